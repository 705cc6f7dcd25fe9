use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use img_shrink::compressor::Compressor;
use img_shrink::error::{Result, ShrinkError};
use img_shrink::{first_free_name, format_file_size, stage_inventory, Inventory};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

struct CopyCompressor;

impl Compressor for CopyCompressor {
    fn compress(&self, input: &Path, output_dir: &Path) -> Result<()> {
        let target = output_dir.join(input.file_name().unwrap());
        fs::copy(input, &target).map_err(|e| ShrinkError::fs("copy", &target, e))?;
        Ok(())
    }
}

fn create_test_tree(dirs: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    for d in 0..dirs {
        let dir = temp_dir.path().join(format!("level_{}", d % 4)).join(format!("dir_{}", d));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_dir {
            let ext = if f % 3 == 0 { "txt" } else { "png" };
            let mut file = File::create(dir.join(format!("file_{}.{}", f, ext))).unwrap();
            file.write_all(&vec![0u8; 512]).unwrap();
        }
    }

    temp_dir
}

fn bench_format_file_size(c: &mut Criterion) {
    c.bench_function("format_file_size", |b| {
        b.iter(|| {
            for bytes in [0u64, 1023, 1536, 1_048_576, 5_368_709_120] {
                black_box(format_file_size(black_box(bytes)));
            }
        })
    });
}

fn bench_first_free_name(c: &mut Criterion) {
    c.bench_function("first_free_name", |b| {
        b.iter(|| first_free_name(black_box("img_optimized"), |n| n.len() < 18))
    });
}

fn bench_inventory_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory_scan");

    for (dirs, files) in [(10, 10), (50, 20)] {
        let tree = create_test_tree(dirs, files);
        group.bench_with_input(
            BenchmarkId::new("scan", format!("{}x{}", dirs, files)),
            tree.path(),
            |b, root| b.iter(|| Inventory::scan(black_box(root)).unwrap()),
        );
    }

    group.finish();
}

fn bench_staging(c: &mut Criterion) {
    img_shrink::logger::set_quiet_mode(true);
    let tree = create_test_tree(20, 10);
    let inventory = Inventory::scan(tree.path()).unwrap();

    c.bench_function("stage_copy_200", |b| {
        b.iter(|| {
            let out = TempDir::new().unwrap();
            let staging_root = out.path().join("stage");
            stage_inventory(&inventory, &staging_root, &CopyCompressor, 4).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_format_file_size,
    bench_first_free_name,
    bench_inventory_scan,
    bench_staging
);
criterion_main!(benches);
