use brain_core::{
    Activity, ActivityGroup, Behavior, Blackboard, Brain, MemoryKey, MemoryRequirement,
    TickContext, WorldMut, WorldView,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TARGET: MemoryKey<u64> = MemoryKey::new(1);

#[derive(Default)]
struct World;

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

struct Hold {
    requirement: MemoryRequirement,
}

impl Behavior<World> for Hold {
    fn memory_requirement(&self) -> &MemoryRequirement {
        &self.requirement
    }

    fn should_keep_running(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &World,
        _blackboard: &Blackboard,
    ) -> bool {
        true
    }
}

const ACTIVITIES: [Activity; 8] = [
    Activity::CORE,
    Activity::IDLE,
    Activity::WORK,
    Activity::PLAY,
    Activity::REST,
    Activity::MEET,
    Activity::FIGHT,
    Activity::AVOID,
];

fn bench_brain_tick(c: &mut Criterion) {
    let mut builder = Brain::builder(1u64);
    for (i, activity) in ACTIVITIES.into_iter().enumerate() {
        let behaviors = (0..8)
            .map(|_| {
                Box::new(Hold {
                    requirement: MemoryRequirement::none().has(TARGET),
                }) as Box<dyn Behavior<World>>
            })
            .collect();
        builder = builder.activity(
            ActivityGroup::builder(activity)
                .priority(i as i32 * 10)
                .behaviors(behaviors),
        );
    }
    let mut brain = builder.build().expect("valid brain");
    brain.blackboard.set(TARGET, 7);
    let mut world = World;

    let mut tick: u64 = 0;
    c.bench_function("brain-core/tick(groups=8,behaviors=64)", |b| {
        b.iter(|| {
            brain.tick(&TickContext::new(tick), &mut world);
            black_box(brain.running().count());
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_brain_tick);
criterion_main!(benches);
