//! Resolution and index throughput over synthetic tables.
//!
//! Run with: `cargo bench`
//! Results show mean time per full pass and throughput (entities/s).

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use barrage_datamine::data::{
    Augment, BarrageVariant, Equipment, GameTables, Retrofit, Ship, Skill, SkillUpgrade, Table,
};
use barrage_datamine::index::{build_equip_index, build_ship_index};
use barrage_datamine::parallel::WorkerPool;
use barrage_datamine::resolve::resolve_entities;
use serde_json::json;

const SHIPS: u32 = 2_000;
const EQUIPMENTS: u32 = 800;
const AUGMENTS: u32 = 200;

fn synthetic_tables() -> GameTables {
    let ships: Table<Ship> = (0..SHIPS)
        .map(|i| {
            let base = i * 10;
            let ship = Ship {
                name: format!("Ship {i}"),
                skills: vec![Some(vec![base]), Some(vec![base, base + 1, base + 2])],
                retro: (i % 3 == 0).then(|| Retrofit {
                    skills: vec![SkillUpgrade {
                        replace: Some(base),
                        with: Some(base + 5),
                    }],
                }),
                research: None,
                unique_aug: (i % 10 == 0).then_some(i / 10 % AUGMENTS),
            };
            (i.to_string(), ship)
        })
        .collect();
    let equipments: Table<Equipment> = (0..EQUIPMENTS)
        .map(|i| {
            let equip = Equipment {
                name: format!("Gear {i}"),
                skills: vec![100_000 + i],
            };
            (i.to_string(), equip)
        })
        .collect();
    let augments: Table<Augment> = (0..AUGMENTS)
        .map(|i| {
            let augment = Augment {
                name: format!("Augment {i}"),
                skills: vec![200_000 + i],
                skill_upgrades: Vec::new(),
            };
            (i.to_string(), augment)
        })
        .collect();
    let skills: Table<Skill> = (0..SHIPS * 10)
        .map(|id| {
            let skill = Skill {
                name: Some(format!("Skill {id}")),
                skill_type: id % 3,
            };
            (id.to_string(), skill)
        })
        .collect();
    let barrages: Table<Vec<BarrageVariant>> = (0..SHIPS * 10)
        .step_by(2)
        .map(|id| {
            let variant = BarrageVariant::new(
                format!("Barrage {id} (Lv. 10)"),
                vec![json!({ "type": "weapon", "damage": id % 97, "coefficient": 1.25 })],
            );
            (id.to_string(), vec![variant])
        })
        .collect();

    GameTables {
        ships,
        equipments,
        augments,
        skills,
        barrages,
    }
}

fn bench_resolver(c: &mut Criterion) {
    let tables = synthetic_tables();
    let entities = u64::from(SHIPS + EQUIPMENTS + AUGMENTS);

    let mut group = c.benchmark_group("resolver");
    group.throughput(Throughput::Elements(entities));
    for workers in [1usize, 0] {
        let pool = WorkerPool::with_workers(workers);
        let label = if workers == 0 { "resolve_all_cores".to_string() } else { format!("resolve_{workers}_worker") };
        group.bench_function(label, |b| {
            b.iter(|| black_box(resolve_entities(black_box(&tables), &pool)))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("skill_index");
    group.throughput(Throughput::Elements(u64::from(SHIPS)));
    group.bench_function("ship_index", |b| b.iter(|| black_box(build_ship_index(black_box(&tables)))));
    group.bench_function("equip_index", |b| b.iter(|| black_box(build_equip_index(black_box(&tables)))));
    group.finish();
}

criterion_group!(benches, bench_resolver);
criterion_main!(benches);
