use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;

const HEADERS: [&str; 11] = [
    "Brand Name",
    "Provider Name",
    "Location ID",
    "Location Name",
    "Location Local Authority",
    "Location Inspection Directorate",
    "Care homes beds",
    "Location Latest Overall Rating",
    "Publication Date",
    "Location Latitude",
    "Location Longitude",
];

const BRANDS: [&str; 8] = [
    "Oakleaf Care",
    "Harbour Homes",
    "Meadowview Group",
    "Silver Birch",
    "Northern Lights Care",
    "Willow Tree Living",
    "Kingfisher Healthcare",
    "Independent",
];

/// (local authority, latitude, longitude) of the authority's centre.
const AUTHORITIES: [(&str, f64, f64); 8] = [
    ("Leeds", 53.80, -1.55),
    ("Birmingham", 52.48, -1.90),
    ("Bristol", 51.45, -2.59),
    ("Norfolk", 52.63, 1.30),
    ("Cumberland", 54.66, -3.36),
    ("Kent", 51.27, 0.52),
    ("Manchester", 53.48, -2.24),
    ("Cornwall", 50.26, -5.05),
];

/// (rating, cumulative probability)
const RATINGS: [(&str, f64); 4] = [
    ("Good", 0.72),
    ("Outstanding", 0.79),
    ("Requires improvement", 0.95),
    ("Inadequate", 1.0),
];

const HOME_NAMES: [&str; 10] = [
    "House", "Lodge", "Court", "Manor", "Gardens", "Grange", "View", "Place", "Hall", "Mews",
];

/// Write a synthetic care-home register in the published column layout.
///
/// Roughly one row in twenty is deliberately dirty (unparsable beds, missing
/// coordinates, a non-care-home directorate, no rating) so the loader's
/// cleaning rules can be seen at work.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", version)]
struct Args {
    /// Output file; `.csv` or `.parquet`.
    #[arg(long, short, default_value = "sample_care_homes.csv")]
    out: PathBuf,
    /// Number of rows to write.
    #[arg(long, short, default_value_t = 2_000)]
    rows: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One generated row; `None` cells are written empty.
struct Row {
    brand: String,
    provider: String,
    location_id: String,
    location_name: String,
    local_authority: String,
    directorate: String,
    beds: Option<String>,
    rating: Option<String>,
    publication_date: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

fn generate(rows: usize, seed: u64) -> Vec<Row> {
    let mut rng = SimpleRng::new(seed);
    let first_publication = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default();

    (0..rows)
        .map(|i| {
            let brand = rng.pick(&BRANDS).to_string();
            // Independents are mostly one-home providers.
            let provider = if brand == "Independent" {
                format!("Independent Provider {}", rng.below(rows.max(1)))
            } else {
                format!("{brand} Operations {}", rng.below(4) + 1)
            };
            let &(authority, lat, lon) = rng.pick(&AUTHORITIES);

            let beds = match rng.below(20) {
                0 => Some("unknown".to_string()),
                1..=6 => Some((rng.below(20) + 1).to_string()),
                7..=17 => Some((rng.below(60) + 20).to_string()),
                _ => Some((rng.below(120) + 80).to_string()),
            };

            let roll = rng.next_f64();
            let rating = RATINGS
                .iter()
                .find(|(_, p)| roll < *p)
                .map(|(r, _)| r.to_string())
                .filter(|_| !rng.chance(0.03));

            let publication_date = (!rng.chance(0.05)).then(|| {
                let offset = Duration::days(rng.below(6 * 365) as i64);
                (first_publication + offset).format("%Y-%m-%d").to_string()
            });

            let located = !rng.chance(0.04);
            Row {
                location_name: format!("{} {}", authority, rng.pick(&HOME_NAMES)),
                brand,
                provider,
                location_id: format!("1-{:09}", 100_000 + i),
                local_authority: authority.to_string(),
                directorate: if rng.chance(0.05) {
                    "Hospitals".to_string()
                } else {
                    "Adult social care".to_string()
                },
                beds,
                rating,
                publication_date,
                latitude: located.then(|| lat + (rng.next_f64() - 0.5) * 0.6),
                longitude: (located && !rng.chance(0.02))
                    .then(|| lon + (rng.next_f64() - 0.5) * 0.9),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADERS)?;
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let coord = |v: Option<f64>| v.map(|x| format!("{x:.5}")).unwrap_or_default();
    for row in rows {
        writer.write_record([
            row.brand.clone(),
            row.provider.clone(),
            row.location_id.clone(),
            row.location_name.clone(),
            row.local_authority.clone(),
            row.directorate.clone(),
            opt(&row.beds),
            opt(&row.rating),
            opt(&row.publication_date),
            coord(row.latitude),
            coord(row.longitude),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let text = |f: fn(&Row) -> Option<&str>| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&Row) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        text(|r| Some(r.brand.as_str())),
        text(|r| Some(r.provider.as_str())),
        text(|r| Some(r.location_id.as_str())),
        text(|r| Some(r.location_name.as_str())),
        text(|r| Some(r.local_authority.as_str())),
        text(|r| Some(r.directorate.as_str())),
        // kept as text so the unparsable sentinel survives
        text(|r| r.beds.as_deref()),
        text(|r| r.rating.as_deref()),
        text(|r| r.publication_date.as_deref()),
        number(|r| r.latitude),
        number(|r| r.longitude),
    ];
    let schema = Arc::new(Schema::new(
        HEADERS
            .iter()
            .zip(&columns)
            .map(|(name, col)| Field::new(*name, col.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rows = generate(args.rows, args.seed);
    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.out, &rows)?,
        "parquet" | "pq" => write_parquet(&args.out, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} rows to {}", rows.len(), args.out.display());
    println!("Wrote {} care-home rows to {}", rows.len(), args.out.display());
    Ok(())
}
