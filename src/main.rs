use inspecta::types::{Report, TechnicalOpinion};
use inspecta::{ComposerBuilder, GeneratedReport, PipelineError, Progress};
use std::env;
use std::fs;
use std::path::Path;

fn usage(program: &str) -> ! {
    eprintln!("Generates a .docx inspection report from JSON data.");
    eprintln!();
    eprintln!(
        "Usage: {} <pendency|opinion> <path/to/data.json> [path/to/config.json] [output-dir]",
        program
    );
    eprintln!();
    eprintln!("Local image references and branding assets resolve relative to the data file.");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("inspecta");
    if args.len() < 3 || args.len() > 5 {
        usage(program);
    }
    let kind = args[1].as_str();
    let data_path = Path::new(&args[2]);
    let output_dir = Path::new(args.get(4).map(String::as_str).unwrap_or("."));

    let mut builder = ComposerBuilder::new()
        .with_asset_dir(data_path.parent().unwrap_or_else(|| Path::new(".")));
    if let Some(config_path) = args.get(3) {
        println!("Loading configuration from {}", config_path);
        builder = builder.with_config_file(config_path)?;
    }
    let composer = builder.build()?;

    println!("Loading data from {}", data_path.display());
    let data = fs::read_to_string(data_path)?;

    let mut print_progress = |p: &Progress| {
        println!("[{:>3}%] {:<15} {}", p.percent, p.phase.to_string(), p.message);
    };
    let generated: GeneratedReport = match kind {
        "pendency" => {
            let report: Report = serde_json::from_str(&data)?;
            composer
                .generate_pendency_report_with_progress(&report, Some(&mut print_progress))
                .await?
        }
        "opinion" => {
            let opinion: TechnicalOpinion = serde_json::from_str(&data)?;
            composer
                .generate_technical_opinion_with_progress(&opinion, Some(&mut print_progress))
                .await?
        }
        _ => usage(program),
    };

    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(&generated.filename);
    fs::write(&output_path, &generated.bytes)?;

    println!("Successfully generated {}", output_path.display());
    if !generated.summary.image_failures.is_empty() {
        println!(
            "{} image(s) could not be embedded:",
            generated.summary.image_failures.len()
        );
        for reference in &generated.summary.image_failures {
            println!("  - {}", reference);
        }
    }
    Ok(())
}
