//! CLI command tests

use std::io::Write;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_dashboard_defaults() {
    let cli = Cli::parse_from(["akasys", "dashboard"]);
    match cli.command {
        Commands::Dashboard { limit } => assert_eq!(limit, 50),
        _ => panic!("expected dashboard command"),
    }
}

#[test]
fn test_parse_sales_pagination() {
    let cli = Cli::parse_from(["akasys", "sales", "--skip", "25", "--limit", "10"]);
    match cli.command {
        Commands::Sales { skip, limit } => {
            assert_eq!(skip, 25);
            assert_eq!(limit, 10);
        }
        _ => panic!("expected sales command"),
    }
}

#[test]
fn test_parse_global_api_url() {
    let cli = Cli::parse_from(["akasys", "--api-url", "http://b:9000", "health"]);
    assert_eq!(cli.api_url.as_deref(), Some("http://b:9000"));
}

#[test]
fn test_parse_analyze_files() {
    let cli = Cli::parse_from([
        "akasys", "analyze", "--sales", "v.csv", "--stock", "e.csv", "--json",
    ]);
    match cli.command {
        Commands::Analyze { sales, stock, json } => {
            assert!(sales.is_some());
            assert!(stock.is_some());
            assert!(json);
        }
        _ => panic!("expected analyze command"),
    }
}

#[test]
fn test_parse_serve_flags() {
    let cli = Cli::parse_from(["akasys", "serve", "--port", "8080", "--no-auth"]);
    match cli.command {
        Commands::Serve { port, no_auth, host, .. } => {
            assert_eq!(port, 8080);
            assert!(no_auth);
            assert_eq!(host, "127.0.0.1");
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Helper Tests ==========

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate("abc", 10), "abc");
}

#[test]
fn test_truncate_long_string_gets_ellipsis() {
    assert_eq!(truncate("abcdefghij", 6), "abc...");
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze_requires_an_input() {
    let result = commands::cmd_analyze(None, None, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_runs_on_local_files() {
    let dir = tempfile::TempDir::new().unwrap();

    let vendas_path = dir.path().join("vendas.csv");
    let mut vendas = std::fs::File::create(&vendas_path).unwrap();
    writeln!(vendas, "data,cod_cliente,cod_produto,zs_peso_liquido").unwrap();
    writeln!(vendas, "2024-01-01,CLI001,PRD001,80.0").unwrap();
    writeln!(vendas, "2024-01-02,CLI002,PRD002,20.0").unwrap();

    let estoque_path = dir.path().join("estoque.csv");
    let mut estoque = std::fs::File::create(&estoque_path).unwrap();
    writeln!(estoque, "data,cod_cliente,cod_produto,dias_em_estoque,es_totalestoque").unwrap();
    writeln!(estoque, "2024-01-02,CLI001,PRD001,25,40.0").unwrap();

    let result = commands::cmd_analyze(Some(&vendas_path), Some(&estoque_path), true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_missing_file_errors() {
    let missing = std::path::Path::new("/definitely/not/here.csv");
    assert!(commands::cmd_analyze(Some(missing), None, false).is_err());
}
