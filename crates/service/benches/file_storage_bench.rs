use criterion::{criterion_group, criterion_main, Criterion};

use models::{Entity, EntityKind};
use service::storage::FileStorage;
use service::StorageEngine;

fn bench_save_reload(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let path = std::env::temp_dir().join(format!("hbnb_bench_{}.json", uuid::Uuid::new_v4()));
    let store = FileStorage::new(&path);

    // 1000 mixed entities registered outside the measured loop
    rt.block_on(async {
        store.reload().await.unwrap();
        for i in 0..1000 {
            let kind = EntityKind::ALL[i % EntityKind::ALL.len()];
            store.add(&Entity::new(kind)).await.unwrap();
        }
    });

    c.bench_function("file_storage_save_1000", |b| {
        b.to_async(&rt).iter(|| async { store.save().await.unwrap() });
    });

    c.bench_function("file_storage_reload_1000", |b| {
        b.to_async(&rt).iter(|| async { store.reload().await.unwrap() });
    });

    let _ = std::fs::remove_file(&path);
}

criterion_group!(benches, bench_save_reload);
criterion_main!(benches);
