use tracklog::infra::config;
use tracklog::TrackTypeRegistry;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--list]\n\
         \n\
         Optional env vars:\n\
           TRACK_TYPES_PATH (JSON track type table; built-in table when unset)\n\
           API_BIND_ADDR, RUST_LOG\n"
    );
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let list = args.iter().any(|a| a == "--list");

    let path = config::track_types_path();

    println!("> Preflight:");
    println!("  API_BIND_ADDR={}", config::api_bind_addr());
    println!("  RUST_LOG={}", config::log_filter());
    match &path {
        Some(p) => println!("  TRACK_TYPES_PATH={}", p.display()),
        None => println!("  TRACK_TYPES_PATH unset (using built-in table)"),
    }

    let registry = TrackTypeRegistry::load(path.as_deref())
        .map_err(|e| anyhow::anyhow!("Track type table is invalid: {}", e))?;
    if registry.is_empty() {
        eprintln!("  Warning: track type table is empty; every track will be rejected.");
    }

    let without_data = registry.iter().filter(|t| t.fields.is_empty()).count();
    println!(
        "  Track types: {} ({} without data fields)",
        registry.len(),
        without_data
    );

    if list {
        for track_type in registry.iter() {
            println!("  {} ({})", track_type.id, track_type.title);
            for (field, rule) in track_type.fields.iter() {
                let rendered = serde_json::to_string(rule)?;
                println!("    {}: {}", field, rendered);
            }
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
