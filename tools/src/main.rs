//! ledger-runner: builds customer views from a local record file.
//!
//! Usage:
//!   ledger-runner --data-dir ./data
//!   ledger-runner --data-dir ./data --records other.json --ipc-mode

use anyhow::Result;
use ledger_graph_core::{
    config::ServiceConfig,
    source::{load_records, load_with_fallback},
    types::CustomerId,
    AggregationService,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    HasCustomer { customer_id: CustomerId },
    Transactions { customer_id: CustomerId },
    Relationships { customer_id: CustomerId },
    Summary,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");

    let mut config = match ServiceConfig::load(data_dir) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e}; using default service config");
            ServiceConfig::default()
        }
    };
    if let Some(records) = flag_value(&args, "--records") {
        config.records_file = records.to_string();
    }

    if !ipc_mode {
        println!("ledger-runner");
        println!("  data_dir:     {data_dir}");
        println!("  records:      {}", config.records_file);
        println!("  chain_filter: {:?}", config.chain_filter);
        println!();
    }

    let primary = config.records_path(data_dir);
    let records = match config.fallback_path(data_dir) {
        Some(fallback) => load_with_fallback(&primary, &fallback),
        None => load_records(&primary),
    };
    let records = records.unwrap_or_else(|e| {
        log::error!("Failed to fetch transactions: {e}");
        Vec::new()
    });

    let service = AggregationService::with_config(&records, &config);

    if ipc_mode {
        run_ipc_loop(&service)?;
    } else {
        print_summary(&service);
    }
    Ok(())
}

fn run_ipc_loop(service: &AggregationService) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "status": 400, "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::HasCustomer { customer_id } => {
                serde_json::json!({ "status": 200, "known": service.has_customer(customer_id) })
            }
            IpcCommand::Transactions { customer_id } => {
                if service.has_customer(customer_id) {
                    serde_json::to_value(service.transactions_envelope(customer_id))?
                } else {
                    not_found()
                }
            }
            IpcCommand::Relationships { customer_id } => {
                if service.has_customer(customer_id) {
                    serde_json::to_value(service.relationships_envelope(customer_id))?
                } else {
                    not_found()
                }
            }
            IpcCommand::Summary => serde_json::to_value(service.summary())?,
        };
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn not_found() -> serde_json::Value {
    serde_json::json!({ "status": 404 })
}

fn print_summary(service: &AggregationService) {
    let summary = service.summary();

    println!("=== BUILD SUMMARY ===");
    println!("  records indexed:    {}", summary.indexed_records);
    println!("  customers:          {}", summary.customers);
    println!("  chains:             {}", summary.chains);
    println!("  rejected chains:    {}", summary.rejected_chains);
    println!("  relationship edges: {}", summary.relationship_edges);

    println!();
    println!("=== CUSTOMERS ===");
    let ids = service.customer_ids();
    if ids.is_empty() {
        println!("  (No customers found)");
    }
    for id in ids {
        let related: Vec<String> = service
            .customer_relationships(id)
            .iter()
            .map(|r| format!("{}:{}", r.relation_type.as_str(), r.related_customer_id))
            .collect();
        println!(
            "  {id:>6} | chains: {:>3} | related: [{}]",
            service.customer_transactions(id).len(),
            related.join(", ")
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
