use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mandelbrot_gradient::core::actions::render_pass::render_pass::render_request;
use mandelbrot_gradient::{
    Colour, ColourStop, Dimensions, FAVOURITE_LOCATIONS, GradientStops, PixelBuffer,
    RenderRequest, Viewport,
};
use std::hint::black_box;

fn gradient() -> GradientStops {
    GradientStops::new(vec![
        ColourStop::new("start", Colour::new(0, 7, 100), 0.0),
        ColourStop::new("mid", Colour::new(237, 255, 255), 0.4),
        ColourStop::new("warm", Colour::new(255, 170, 0), 0.7),
        ColourStop::new("end", Colour::new(0, 2, 0), 1.0),
    ])
    .unwrap()
}

fn bench_render_pass(c: &mut Criterion) {
    let dimensions = Dimensions::new(320, 240).unwrap();
    let mut group = c.benchmark_group("render_pass");
    group.sample_size(20);

    for location in FAVOURITE_LOCATIONS.iter().take(3) {
        let request = RenderRequest::new(location.viewport, dimensions, gradient(), 0.2).unwrap();
        let mut buffer = PixelBuffer::new(dimensions);

        group.bench_with_input(
            BenchmarkId::from_parameter(location.name),
            &request,
            |b, request| {
                b.iter(|| render_request(black_box(request), &mut buffer).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_interior(c: &mut Criterion) {
    // zoomed into the main cardioid: every pixel short-circuits
    let dimensions = Dimensions::new(320, 240).unwrap();
    let request = RenderRequest::new(
        Viewport::new(-0.2, 0.0, 20.0).unwrap(),
        dimensions,
        GradientStops::default(),
        0.2,
    )
    .unwrap();
    let mut buffer = PixelBuffer::new(dimensions);

    c.bench_function("render_pass/cardioid_interior", |b| {
        b.iter(|| render_request(black_box(&request), &mut buffer).unwrap());
    });
}

criterion_group!(benches, bench_render_pass, bench_interior);
criterion_main!(benches);
