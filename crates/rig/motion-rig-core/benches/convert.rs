use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motion_rig_core::{convert, MotionSequence, RigConfig, SkeletonPreset};

fn synthetic_motion(frames: usize, joints: usize) -> MotionSequence {
    let data = (0..frames * joints * 3)
        .map(|i| (i % 97) as f32 * 0.01)
        .collect();
    MotionSequence::from_flat(frames, joints, data).expect("synthetic motion")
}

fn bench_convert(c: &mut Criterion) {
    let topo = SkeletonPreset::HumanMl22.topology();
    let cfg = RigConfig::default();
    // ~10 s of motion at 20 fps
    let motion = synthetic_motion(196, topo.joint_count());

    c.bench_function("convert_humanml22_196_frames", |b| {
        b.iter(|| convert(black_box(&topo), black_box(&motion), &cfg).expect("convert"))
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
