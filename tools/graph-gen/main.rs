use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate synthetic campaign graphs for routegraph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated editor document to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Optional path for a matching validation context
    #[arg(long)]
    context: Option<String>,

    /// Number of segments hanging off the traffic node
    #[arg(long, default_value_t = 50)]
    segments: usize,

    /// Maximum number of variants per segment
    #[arg(long, default_value_t = 4)]
    max_variants: usize,

    /// Number of distinct landing pages to reference
    #[arg(long, default_value_t = 20)]
    pages: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const COUNTRIES: [&str; 6] = ["DE", "AT", "CH", "FR", "NL", "US"];
const DEVICES: [&str; 3] = ["mobile", "desktop", "tablet"];

struct GraphBuilder {
    rng: StdRng,
    pages: usize,
    nodes: Vec<Value>,
    edges: Vec<Value>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.pages == 0 || cli.max_variants == 0 {
        eprintln!("Error: --pages and --max-variants must be at least 1");
        std::process::exit(1);
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let mut builder = GraphBuilder {
        rng,
        pages: cli.pages,
        nodes: Vec::new(),
        edges: Vec::new(),
    };

    println!(
        "Generating campaign graph ({} segments, up to {} variants each)...",
        cli.segments, cli.max_variants
    );
    builder.traffic();
    for index in 0..cli.segments {
        builder.segment(index, cli.max_variants);
    }

    let node_count = builder.nodes.len();
    let edge_count = builder.edges.len();
    let document = json!({ "nodes": builder.nodes, "edges": builder.edges });
    fs::write(&cli.output, serde_json::to_string_pretty(&document)?)?;
    println!(
        "Wrote {} nodes and {} edges to '{}'",
        node_count, edge_count, cli.output
    );

    if let Some(path) = cli.context {
        let landing_pages: serde_json::Map<String, Value> = (0..cli.pages)
            .map(|i| (page_id(i), json!("published")))
            .collect();
        let context = json!({ "landingPages": landing_pages });
        fs::write(&path, serde_json::to_string_pretty(&context)?)?;
        println!("Wrote validation context to '{}'", path);
    }

    Ok(())
}

impl GraphBuilder {
    fn traffic(&mut self) {
        let default_page = self.random_page();
        self.nodes.push(json!({
            "id": "traffic",
            "type": "traffic",
            "data": { "defaultVariantId": default_page }
        }));
    }

    fn segment(&mut self, index: usize, max_variants: usize) {
        let id = format!("segment-{}", index);
        let country = COUNTRIES[self.rng.random_range(0..COUNTRIES.len())];
        let device = DEVICES[self.rng.random_range(0..DEVICES.len())];
        let page = self.random_page();
        let priority = self.rng.random_range(0..100);

        self.nodes.push(json!({
            "id": id,
            "type": "segment",
            "data": {
                "title": format!("{} {} visitors", country, device),
                "priority": priority,
                "primaryLandingPageId": page,
                "rules": [
                    { "id": format!("{}-country", id), "ruleType": "country", "operator": "equals", "value": country },
                    { "id": format!("{}-device", id), "ruleType": "device", "operator": "equals", "value": device }
                ]
            }
        }));
        self.link("traffic", &id);

        let variants = self.rng.random_range(1..=max_variants);
        if variants > 1 && self.rng.random_bool(0.3) {
            self.ab_test(&id, variants);
        } else {
            for (i, share) in split_hundred(variants).into_iter().enumerate() {
                let variant_id = format!("{}-variant-{}", id, i);
                let page = self.random_page();
                self.nodes.push(json!({
                    "id": variant_id,
                    "type": "variant",
                    "data": { "title": format!("Variant {}", i), "landingPageId": page, "trafficPercentage": share }
                }));
                self.link(&id, &variant_id);
            }
        }
    }

    fn ab_test(&mut self, segment_id: &str, arms: usize) {
        let test_id = format!("{}-test", segment_id);
        let shares = split_hundred(arms);
        let variants: Vec<Value> = shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                json!({
                    "id": format!("{}-arm-{}", test_id, i),
                    "name": format!("Arm {}", i),
                    "landingPageId": page_id(i % self.pages),
                    "trafficAllocation": share,
                    "isControl": i == 0
                })
            })
            .collect();

        self.nodes.push(json!({
            "id": test_id,
            "type": "ab-test",
            "data": {
                "title": format!("Test for {}", segment_id),
                "hypothesis": "A shorter headline lifts signups",
                "status": "draft",
                "primaryMetric": "signup",
                "completionCriteria": { "minSampleSize": 1000 },
                "confidenceLevel": 95,
                "variants": variants
            }
        }));
        self.link(segment_id, &test_id);

        for (i, share) in shares.into_iter().enumerate() {
            let page = self.random_page();
            self.nodes.push(json!({
                "id": format!("{}-node-{}", test_id, i),
                "type": "variant",
                "parentId": test_id,
                "data": { "title": format!("Arm {}", i), "landingPageId": page, "trafficPercentage": share }
            }));
        }
    }

    fn link(&mut self, source: &str, target: &str) {
        self.edges.push(json!({
            "id": format!("{}->{}", source, target),
            "source": source,
            "target": target
        }));
    }

    fn random_page(&mut self) -> String {
        page_id(self.rng.random_range(0..self.pages))
    }
}

fn page_id(index: usize) -> String {
    format!("lp-{}", index)
}

/// Whole-number shares that add up to exactly 100.
fn split_hundred(parts: usize) -> Vec<u32> {
    let parts = parts as u32;
    let base = 100 / parts;
    let remainder = 100 % parts;
    (0..parts)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}
