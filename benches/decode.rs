use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vcf_topeffect::decode::{decode_annotation, decode_info, project_fields};
use vcf_topeffect::select::{materialize_top_effect, select_top_effect};
use vcf_topeffect::{InfoSchema, Pipeline, VariantRecords};

const PATH: &str = "resources/example.ann.vcf";

fn annotation(n_effects: usize) -> String {
    (0..n_effects)
        .map(|i| {
            format!(
                "C|missense_variant|MODERATE|GENE{}|{}|transcript|NM_{}.1|protein_coding|2/10|c.100A>G|p.Lys34Glu|150/2000|100/1800|34/599||",
                i, i, i
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn benchmark_info(c: &mut Criterion) {
    let schema = InfoSchema::clinvar();
    let raw = format!(
        "ALLELEID=70000;CLNDN=Hereditary_breast_ovarian_cancer_syndrome;CLNSIG=Pathogenic;DB;ANN={}",
        annotation(8)
    );
    c.bench_function("INFO decode+project", |b| {
        b.iter(|| {
            let info = decode_info(black_box(&raw)).unwrap();
            project_fields(&info, schema.fields(), 1).unwrap()
        })
    });
}

fn benchmark_annotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ANN top effect");
    for n in [1usize, 8, 64].iter() {
        let raw = annotation(*n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &raw, |b, raw| {
            b.iter(|| {
                let effects = decode_annotation(black_box(raw));
                materialize_top_effect(&select_top_effect(&effects))
            })
        });
    }
    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    c.bench_function("pipeline", |b| {
        b.iter(|| {
            let records = VariantRecords::from_path(PATH).unwrap();
            Pipeline::default().run(records).unwrap()
        })
    });
}

criterion_group!(benches, benchmark_info, benchmark_annotation, benchmark_pipeline);
criterion_main!(benches);
