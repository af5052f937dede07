//! Integration tests for akasys-core
//!
//! These tests exercise the full fetch → ingest → analyze workflow against
//! the mock backend, the same path the dashboard server and CLI take.

use akasys_core::{
    api::BackendClient,
    import::{parse_estoque_csv, parse_vendas_csv},
    insights::{InsightEngine, Priority},
    models::{SaleRecord, StockRecord},
    stats::dashboard_stats,
    test_utils::{MockBackendServer, MOCK_PASSWORD, MOCK_TOKEN, MOCK_USER},
};

#[tokio::test]
async fn test_full_dashboard_workflow() {
    let server = MockBackendServer::start().await;
    let client = BackendClient::new(&server.url());

    // Login issues a token the data routes accept
    let login = client.login(MOCK_USER, MOCK_PASSWORD).await.unwrap();
    assert_eq!(login.access_token, MOCK_TOKEN);
    let client = client.with_token(&login.access_token);

    // Fetch both collections at the dashboard's page size
    let vendas = client.get_vendas(0, 50).await.unwrap();
    let estoque = client.get_estoque(0, 50).await.unwrap();
    assert!(!vendas.is_empty());
    assert!(!estoque.is_empty());

    // Ingest into typed records
    let sales = SaleRecord::from_rows(&vendas).unwrap();
    let stock = StockRecord::from_rows(&estoque).unwrap();

    // The seeded dataset satisfies every rule's preconditions
    let insights = InsightEngine::new().analyze(&sales, &stock);
    assert_eq!(insights.len(), 5);

    // Seed data: recent seven days 50% heavier -> acceleration, high
    assert_eq!(insights[0].title, "Sales Acceleration");
    assert_eq!(insights[0].priority, Priority::High);

    // Seed data: 6 of 10 positions aging -> high
    assert_eq!(insights[1].title, "Stock Aging");
    assert_eq!(insights[1].priority, Priority::High);

    let stats = dashboard_stats(&sales, &stock);
    assert!(stats.total_volume > 0.0);
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.active_clients, 2);
    assert!(stats.coverage_days > 0.0);
}

#[tokio::test]
async fn test_engine_recomputes_from_scratch_per_fetch() {
    let server = MockBackendServer::start().await;
    let client = BackendClient::new(&server.url()).with_token(MOCK_TOKEN);

    let engine = InsightEngine::new();

    let vendas = client.get_vendas(0, 50).await.unwrap();
    let sales = SaleRecord::from_rows(&vendas).unwrap();
    let first = engine.analyze(&sales, &[]);

    // A second fetch of the same data supersedes the first result with an
    // identical one: no cache, no state carried across runs.
    let vendas_again = client.get_vendas(0, 50).await.unwrap();
    let sales_again = SaleRecord::from_rows(&vendas_again).unwrap();
    let second = engine.analyze(&sales_again, &[]);

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_backend_yields_empty_dashboard() {
    let server = MockBackendServer::start_with(vec![], vec![]).await;
    let client = BackendClient::new(&server.url()).with_token(MOCK_TOKEN);

    let vendas = client.get_vendas(0, 50).await.unwrap();
    let estoque = client.get_estoque(0, 50).await.unwrap();

    let sales = SaleRecord::from_rows(&vendas).unwrap();
    let stock = StockRecord::from_rows(&estoque).unwrap();

    let insights = InsightEngine::new().analyze(&sales, &stock);
    assert!(insights.is_empty());

    let stats = dashboard_stats(&sales, &stock);
    assert_eq!(stats.total_volume, 0.0);
    assert_eq!(stats.active_clients, 0);
}

#[test]
fn test_csv_files_feed_the_same_engine() {
    let vendas_csv = "\
data,cod_cliente,cod_produto,zs_peso_liquido
2024-03-01,CLI001,PRD001,80.0
2024-03-02,CLI001,PRD001,80.0
2024-03-03,CLI002,PRD002,20.0
";
    let estoque_csv = "\
data,cod_cliente,cod_produto,dias_em_estoque,es_totalestoque
2024-03-03,CLI001,PRD001,30,25.0
2024-03-03,CLI002,PRD002,2,15.0
";

    let sales = parse_vendas_csv(vendas_csv.as_bytes()).unwrap();
    let stock = parse_estoque_csv(estoque_csv.as_bytes()).unwrap();

    let insights = InsightEngine::new().analyze(&sales, &stock);

    // Too few dates for the trend rule, but the others fire
    let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Stock Aging",
            "Product Concentration",
            "Stock Coverage",
            "Client Concentration",
        ]
    );

    // Product PRD001 holds 160 of 180 total volume
    assert_eq!(insights[1].priority, Priority::High);
}
