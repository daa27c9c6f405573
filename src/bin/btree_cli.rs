//! Interactive driver for the in-memory B-tree.
//!
//! Usage:
//!   btree_cli [min_degree]
//!
//! Then one command per line on stdin:
//!   insert <key>...
//!   remove <key>
//!   search <key>
//!   contains <key>
//!   print
//!   stats
//!   dump
//!   verify
//!   trace <key>
//!   bulk_insert <count>
//!   quit
//!
//! Set `RUST_LOG=btree_memory=debug` to see root splits and collapses.

use btree_memory::{BTree, DisplayKeys, NaturalOrder, TreeConfig};
use std::env;
use std::io::{self, BufRead};
use std::process::exit;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Tree = BTree<i64, NaturalOrder, DisplayKeys>;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let min_degree = match env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(t) => t,
            Err(_) => {
                eprintln!("Usage: btree_cli [min_degree]");
                exit(1);
            }
        },
        None => TreeConfig::default().min_degree,
    };

    let mut tree: Tree = match BTree::with_printer(min_degree, NaturalOrder, DisplayKeys) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: Failed to create tree: {}", e);
            exit(1);
        }
    };
    tracing::info!(min_degree, "tree ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                exit(1);
            }
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };
        if command == "quit" || command == "exit" {
            break;
        }

        if let Err(message) = run_command(&mut tree, command, args) {
            println!("ERROR: {}", message);
        }
    }
}

fn parse_key(args: &[&str], usage: &str) -> Result<i64, String> {
    match args.first() {
        Some(word) => word.parse().map_err(|_| format!("Invalid key: {}", word)),
        None => Err(format!("Usage: {}", usage)),
    }
}

fn run_command(tree: &mut Tree, command: &str, args: &[&str]) -> Result<(), String> {
    match command {
        "insert" => {
            if args.is_empty() {
                return Err("Usage: insert <key>...".to_string());
            }
            let keys = args
                .iter()
                .map(|word| word.parse().map_err(|_| format!("Invalid key: {}", word)))
                .collect::<Result<Vec<i64>, String>>()?;
            for key in keys {
                tree.insert(key);
            }
            println!("OK");
        }

        "remove" => {
            let key = parse_key(args, "remove <key>")?;
            match tree.remove(&key) {
                Ok(removed) => println!("REMOVED {}", removed),
                Err(_) => println!("NOT_FOUND"),
            }
        }

        "search" => {
            let key = parse_key(args, "search <key>")?;
            match tree.search(&key) {
                Some(location) => println!("FOUND node={} index={}", location.node, location.index),
                None => println!("NOT_FOUND"),
            }
        }

        "contains" => {
            let key = parse_key(args, "contains <key>")?;
            println!("{}", tree.contains(&key));
        }

        "print" => tree.print().map_err(|e| e.to_string())?,

        "stats" => {
            let stats = tree.stats();
            println!("len: {}", stats.len);
            println!("height: {}", stats.height);
            println!("node_count: {}", stats.node_count);
            println!("min_degree: {}", stats.min_degree);
        }

        "dump" => {
            let json = serde_json::to_string_pretty(&tree.snapshot()).map_err(|e| e.to_string())?;
            println!("{}", json);
        }

        "verify" => match tree.verify() {
            Ok(()) => println!("OK"),
            Err(e) => println!("CORRUPT: {}", e),
        },

        "trace" => {
            let key = parse_key(args, "trace <key>")?;
            for line in tree.trace_search(&key) {
                println!("{}", line);
            }
        }

        "bulk_insert" => {
            let count: i64 = match args.first().map(|word| word.parse()) {
                Some(Ok(n)) => n,
                _ => return Err("Usage: bulk_insert <count>".to_string()),
            };

            let start = std::time::Instant::now();
            let base = tree.len() as i64;
            for i in 0..count {
                tree.insert(base + i);
            }
            let elapsed = start.elapsed();

            let ops_per_sec = count as f64 / elapsed.as_secs_f64();
            println!("INSERTED: {}", count);
            println!("TIME_MS: {}", elapsed.as_millis());
            println!("OPS_PER_SEC: {:.0}", ops_per_sec);
        }

        _ => return Err(format!("Unknown command: {}", command)),
    }

    Ok(())
}
