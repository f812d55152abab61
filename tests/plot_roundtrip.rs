use nexus_plt::core::query::{is_class, is_instance, is_varname, select, unique_timesteps};
use nexus_plt::{
    build_summary, load, load_from, ConversionOptions, KeywordMapper, NexusError, Plot,
    SummaryDataset, TimestepAxis, UnitSystem,
};
use std::path::PathBuf;

/// Builds PLT byte streams for tests.
struct PlotWriter {
    buf: Vec<u8>,
}

impl PlotWriter {
    fn new(unit: &[u8; 6], classes: &[(&str, &[&str])]) -> Self {
        let mut w = Self { buf: Vec::new() };
        w.zeros(4);
        w.buf.extend_from_slice(b"PLOT  BIN   ");
        w.buf.extend_from_slice(b"V1    NEXUS 5000  01    ");
        w.buf.extend_from_slice(unit);
        w.zeros(530 + 264);
        for f in [classes.len() as i32, 1, 1, 1980, 10, 10, 3, 0] {
            w.int(f);
        }

        w.zeros(8);
        for (class, _) in classes {
            w.name(class, 8);
        }
        w.zeros(8);
        for (_, vars) in classes {
            w.int(vars.len() as i32);
        }
        w.zeros(8);
        for (_, vars) in classes {
            w.name("TIME", 4);
            for v in *vars {
                w.name(v, 4);
            }
            w.zeros(8);
        }
        w
    }

    fn block(mut self, class: &str, timestep: i32, time: f32, instances: &[(&str, &[f32])]) -> Self {
        self.name(class, 8);
        self.zeros(8);
        self.float(timestep as f32);
        self.float(time);
        self.float(instances.len() as f32);
        self.float(instances.len() as f32);
        self.float(0.0);
        for (instance, values) in instances {
            self.zeros(8);
            self.name(instance, 8);
            self.zeros(64);
            for v in *values {
                self.float(*v);
            }
        }
        self.zeros(8);
        self
    }

    fn stop(mut self) -> Vec<u8> {
        self.name("STOP", 8);
        self.buf
    }

    fn unterminated(self) -> Vec<u8> {
        self.buf
    }

    fn zeros(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(0u8).take(n));
    }

    fn name(&mut self, s: &str, width: usize) {
        let mut bytes = s.as_bytes().to_vec();
        bytes.resize(width, b' ');
        self.buf.extend_from_slice(&bytes);
    }

    fn int(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    fn float(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
    }
}

const FIELD_VARS: &[&str] = &["QOP", "QWP", "COP", "XYZ"];
const WELL_VARS: &[&str] = &["QOP", "BHP"];

fn header_only() -> PlotWriter {
    PlotWriter::new(b"METBAR", &[("FIELD", FIELD_VARS), ("WELL", WELL_VARS)])
}

// Header length in bytes, before the class catalog
const HEADER_LEN: usize = 4 + 12 + 24 + 6 + 794 + 32;

fn sample() -> Vec<u8> {
    header_only()
        .block("FIELD", 2, 60.0, &[("NETWORK", &[20.0, 2.0, 900.0, 7.0]), ("OTHER", &[1.0, 1.0, 1.0, 1.0])])
        .block("WELL", 2, 60.0, &[("P1", &[15.0, 250.0]), ("P2", &[5.0, 240.0])])
        .block("FIELD", 1, 30.0, &[("NETWORK", &[10.0, 1.0, 300.0, 6.0])])
        .block("WELL", 1, 30.0, &[("P1", &[10.0, 260.0])])
        .block("FIELD", 3, 90.0, &[("NETWORK", &[30.0, 3.0, 1800.0, 8.0])])
        .stop()
}

fn temp_path(ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("nexus-{}.{}", uuid::Uuid::new_v4(), ext))
}

#[test]
fn load_sample_plot() {
    let plot = load_from(&sample()[..]).unwrap();
    assert_eq!(plot.header.unit_system, UnitSystem::MetricBars);
    assert_eq!(plot.header.num_classes, 2);
    // 2 field instances + 2 wells + 1 + 1 + 1, times their variable counts
    assert_eq!(plot.data.len(), 2 * 4 + 2 * 2 + 4 + 2 + 4);

    let first = &plot.data[0];
    assert!(first.class.is("FIELD"));
    assert!(first.instance.is("NETWORK"));
    assert!(first.varname.is("QOP"));
    assert_eq!((first.timestep, first.time, first.value), (2, 60.0, 20.0));
}

#[test]
fn summary_roundtrip_through_json() {
    let plot = load_from(&sample()[..]).unwrap();
    let (summary, report): (SummaryDataset, _) = build_summary(
        "ECL_CASE",
        &plot,
        KeywordMapper::field_defaults(),
        &ConversionOptions::default(),
    )
    .unwrap();
    assert_eq!(report.diagnostics.len(), 1);

    let path = temp_path("json");
    summary.write_json(&path).unwrap();
    let loaded = SummaryDataset::read_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, summary);
    assert_eq!(loaded.data_length(), unique_timesteps(&plot).len());
    assert_eq!(loaded.spec.start_date.to_string(), "1980-01-01");

    for (nexus, ecl) in [("QOP", "FOPR"), ("QWP", "FWPR"), ("COP", "FOPT")] {
        let expected: Vec<f32> = select(&plot, |p| {
            is_class("FIELD")(p) && is_instance("NETWORK")(p) && is_varname(nexus)(p)
        })
        .iter()
        .map(|p| p.value)
        .collect();
        assert_eq!(loaded.values(ecl), Some(expected), "{}", ecl);
    }
    assert_eq!(loaded.unit("FOPT"), Some("kSM3"));
    assert_eq!(loaded.timesteps[2].sim_seconds, 90.0 * 86400.0);
}

#[test]
fn unmapped_keyword_is_dropped() {
    let plot = load_from(&sample()[..]).unwrap();
    let (summary, report): (SummaryDataset, _) = build_summary(
        "CASE",
        &plot,
        KeywordMapper::field_defaults(),
        &ConversionOptions::default(),
    )
    .unwrap();

    assert!(report.diagnostics[0].keyword.is("XYZ"));
    assert_eq!(report.diagnostics[0].occurrences, 3);
    assert_eq!(summary.keywords().collect::<Vec<_>>(), vec!["FOPR", "FWPR", "FOPT"]);
}

#[test]
fn extended_table_translates_well_class() {
    let plot = load_from(&sample()[..]).unwrap();
    let mapper = KeywordMapper::new().with_entry("WELL", "BHP", "WBHP");
    let options = ConversionOptions {
        class: "WELL".to_string(),
        instance: "P1".to_string(),
        ..ConversionOptions::default()
    };
    let (summary, report): (SummaryDataset, _) = build_summary("CASE", &plot, &mapper, &options).unwrap();

    assert_eq!(report.nodes, 1);
    assert_eq!(summary.values("WBHP"), Some(vec![260.0, 250.0, 0.0]));
    assert_eq!(summary.unit("WBHP"), Some("BARS"));
}

#[test]
fn load_from_file_and_gzip() {
    let bytes = sample();
    let raw = temp_path("plt");
    std::fs::write(&raw, &bytes).unwrap();

    let gz = temp_path("plt.gz");
    std::fs::write(&gz, gzip(&bytes)).unwrap();

    let from_raw = load(&raw).unwrap();
    let from_gz = load(&gz).unwrap();
    std::fs::remove_file(&raw).ok();
    std::fs::remove_file(&gz).ok();

    assert_eq!(from_raw, from_gz);
    assert_eq!(from_raw, load_from(&bytes[..]).unwrap());
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn load_bytes(bytes: &[u8], ext: &str) -> nexus_plt::Result<Plot> {
    let path = temp_path(ext);
    std::fs::write(&path, bytes).unwrap();
    let result = load(&path);
    std::fs::remove_file(&path).ok();
    result
}

#[test]
fn truncated_gzip_is_truncated_input() {
    let compressed = gzip(&sample());
    let cut = &compressed[..compressed.len() / 2];
    assert!(matches!(
        load_bytes(cut, "plt.gz"),
        Err(NexusError::TruncatedInput { .. })
    ));
}

#[cfg(feature = "zstd")]
#[test]
fn load_zstd_file() {
    let bytes = sample();
    let compressed = zstd::encode_all(&bytes[..], 0).unwrap();
    assert_eq!(load_bytes(&compressed, "plt.zst").unwrap(), load_from(&bytes[..]).unwrap());
}

#[cfg(feature = "lz4")]
#[test]
fn load_lz4_file() {
    use std::io::Write;

    let bytes = sample();
    let mut encoder = lz4::EncoderBuilder::new().build(Vec::new()).unwrap();
    encoder.write_all(&bytes).unwrap();
    let (compressed, result) = encoder.finish();
    result.unwrap();
    assert_eq!(load_bytes(&compressed, "plt.lz4").unwrap(), load_from(&bytes[..]).unwrap());
}

#[test]
fn truncated_catalog_is_truncated_input() {
    let bytes = header_only().unterminated();
    let catalog_end = bytes.len();
    let cuts = (HEADER_LEN..catalog_end).step_by(7).chain([catalog_end - 1]);
    for cut in cuts {
        match load_from(&bytes[..cut]) {
            Err(NexusError::TruncatedInput { section, .. }) => {
                assert_ne!(section, "record block class name", "cut at {}", cut)
            }
            other => panic!("cut at {}: {:?}", cut, other),
        }
    }
}

#[test]
fn missing_file_is_open_failure() {
    let err = load(temp_path("plt")).unwrap_err();
    assert!(matches!(err, NexusError::OpenFailure { .. }));
}

#[test]
fn any_magic_byte_change_is_bad_header() {
    let bytes = sample();
    for i in 4..16 {
        let mut corrupt = bytes.clone();
        corrupt[i] ^= 0x20;
        assert!(
            matches!(load_from(&corrupt[..]), Err(NexusError::BadHeader(_))),
            "byte {}",
            i
        );
    }
}

#[test]
fn negative_header_field_is_bad_header() {
    let bytes = sample();
    let fields_start = HEADER_LEN - 32;
    for k in 0..8 {
        let mut corrupt = bytes.clone();
        corrupt[fields_start + 4 * k] |= 0x80;
        assert!(
            matches!(load_from(&corrupt[..]), Err(NexusError::BadHeader(_))),
            "field {}",
            k
        );
    }
}

#[test]
fn truncated_header_is_truncated_input() {
    let bytes = sample();
    for cut in [0, 3, 15, 40, 100, HEADER_LEN - 32, HEADER_LEN - 1] {
        assert!(
            matches!(load_from(&bytes[..cut]), Err(NexusError::TruncatedInput { .. })),
            "cut at {}",
            cut
        );
    }
}

#[test]
fn truncated_block_yields_no_plot() {
    let bytes = sample();
    // Drop the STOP marker and part of the last block
    let cut = bytes.len() - 8 - 20;
    assert!(matches!(load_from(&bytes[..cut]), Err(NexusError::TruncatedInput { .. })));

    let unterminated = header_only()
        .block("FIELD", 1, 30.0, &[("NETWORK", &[1.0, 2.0, 3.0, 4.0])])
        .unterminated();
    assert!(matches!(
        load_from(&unterminated[..]),
        Err(NexusError::TruncatedInput { section: "record block class name", .. })
    ));
}

#[test]
fn immediate_stop_gives_empty_plot() {
    let bytes = header_only().stop();
    let plot: Plot = load_from(&bytes[..]).unwrap();
    assert!(plot.data.is_empty());
    assert!(TimestepAxis::from_points(&plot.data).is_empty());

    let summary = nexus_plt::ecl_summary("EMPTY", true, &plot).unwrap();
    assert_eq!(summary.data_length(), 0);
}

#[test]
fn axis_ignores_instance_order() {
    let a = header_only()
        .block("WELL", 5, 50.0, &[("P1", &[1.0, 2.0]), ("P2", &[3.0, 4.0])])
        .block("WELL", 4, 40.0, &[("P1", &[1.0, 2.0])])
        .stop();
    let b = header_only()
        .block("WELL", 5, 50.0, &[("P2", &[3.0, 4.0]), ("P1", &[1.0, 2.0])])
        .block("WELL", 4, 40.0, &[("P1", &[1.0, 2.0])])
        .stop();

    let axis_a = TimestepAxis::from_points(&load_from(&a[..]).unwrap().data);
    let axis_b = TimestepAxis::from_points(&load_from(&b[..]).unwrap().data);
    assert_eq!(axis_a, axis_b);
    assert_eq!(axis_a.iter().collect::<Vec<_>>(), vec![(4, 40.0), (5, 50.0)]);
}

#[test]
fn undeclared_class_consumes_no_values() {
    let bytes = header_only()
        .block("REGION", 1, 30.0, &[("R1", &[]), ("R2", &[])])
        .block("FIELD", 1, 30.0, &[("NETWORK", &[1.0, 2.0, 3.0, 4.0])])
        .stop();
    let plot = load_from(&bytes[..]).unwrap();
    assert_eq!(plot.data.len(), 4);
    assert!(plot.data.iter().all(|p| p.class.is("FIELD")));
}
