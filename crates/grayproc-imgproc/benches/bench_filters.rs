use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use grayproc_image::Image;
use grayproc_imgproc::filter::{correlate, gaussian_blur, maximum_filter, mean_filter, Kernel};
use grayproc_imgproc::parallel::ExecutionStrategy;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_size = [*width, *height].into();
            let image_data = (0..width * height).map(|x| (x % 255) as f32).collect();
            let image = Image::<f32, 1>::new(image_size, image_data).unwrap();

            // output image
            let output = Image::<f32, 1>::from_size_val(image_size, 0.0).unwrap();

            let kernel = Kernel::uniform(
                *kernel_size,
                *kernel_size,
                1.0 / (*kernel_size * *kernel_size) as f32,
            )
            .unwrap();

            group.bench_with_input(
                BenchmarkId::new("correlate", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(correlate(src, &mut dst, &kernel)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("mean_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(mean_filter(src, &mut dst, *kernel_size)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("maximum_filter", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(maximum_filter(src, &mut dst, *kernel_size)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur", &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(gaussian_blur(
                            src,
                            &mut dst,
                            (*kernel_size, *kernel_size),
                            (1.5, 1.5),
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter Strategies");

    let (width, height) = (1024, 896);
    let image_size = [width, height].into();
    let image = Image::<f32, 1>::from_size_val(image_size, 1.0).unwrap();
    let output = Image::<f32, 1>::from_size_val(image_size, 0.0).unwrap();
    let kernel = Kernel::uniform(5, 5, 1.0 / 25.0).unwrap();

    for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
        group.bench_with_input(
            BenchmarkId::new("correlate", format!("{:?}", strategy)),
            &(&image, &output),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    black_box(grayproc_imgproc::filter::correlate_with_strategy(
                        src, &mut dst, &kernel, strategy,
                    ))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_filters, bench_strategies);
criterion_main!(benches);
