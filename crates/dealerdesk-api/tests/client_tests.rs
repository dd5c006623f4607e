// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use dealerdesk_api::{ApiError, Client};
use dealerdesk_app::{ReportColumn, ReportId, ReportService, UserId};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};

fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

fn mock_server() -> Result<(Server, String)> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());
    Ok((server, addr))
}

#[test]
fn unreachable_service_error_names_the_config_key() {
    let client =
        Client::new("http://127.0.0.1:1", Duration::from_millis(50)).expect("client should build");

    let error = client
        .automakes()
        .expect_err("request should fail for unreachable endpoint");
    assert!(matches!(error, ApiError::Connection { .. }));
    assert!(error.to_string().contains("api.base_url"));
}

#[test]
fn report_columns_send_service_and_decode_list() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.url(), "/api/reports/u-7/columns?service=inventory");
        let body = r#"[{"name":"Stock#","data":"StockNo"},{"name":"Make","data":"Make"}]"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let columns = client.report_columns(ReportService::Inventory, &UserId::new("u-7"))?;
    assert_eq!(
        columns,
        vec![
            ReportColumn::new("Stock#", "StockNo"),
            ReportColumn::new("Make", "Make"),
        ]
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn report_definition_keeps_blank_columns_until_persisted() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/reports/r-1");
        let body = r#"{"id":"r-1","name":"Aged stock","isdefault":true,
            "columns":[{"name":"VIN","data":"VIN"},{"name":"","data":""}]}"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let report = client.report(&ReportId::new("r-1"))?;
    assert!(report.is_default);
    assert_eq!(report.columns.len(), 2);
    assert_eq!(report.persisted_columns(), vec![ReportColumn::new("VIN", "VIN")]);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn save_posts_columns_in_order() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Post);
        assert_eq!(request.url(), "/api/reports/r-1/columns");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("read request body");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(parsed["columns"][0]["data"], "Year");
        assert_eq!(parsed["columns"][1]["data"], "Make");
        request
            .respond(json_response(r#"{"status":"OK"}"#, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    client.save_report_columns(
        &ReportId::new("r-1"),
        &[ReportColumn::new("Year", "Year"), ReportColumn::new("Make", "Make")],
    )?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn error_status_in_ok_body_is_a_service_error() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(
                r#"{"status":"Error","error":"report r-9 not found"}"#,
                200,
            ))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .report(&ReportId::new("r-9"))
        .expect_err("service error expected");
    assert!(
        matches!(error, ApiError::Service(ref message) if message == "report r-9 not found"),
        "got {error:?}"
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn non_success_status_maps_to_http_error() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(r#"{"error":"token expired"}"#, 401))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client.contact_types().expect_err("http error expected");
    assert_eq!(error.to_string(), "server error (401): token expired");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn empty_model_object_means_no_models() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        for body in [r#"{}"#, r#"[{"name":"Defender"}]"#] {
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), "/api/inventory/automakes/landrover/models");
            request
                .respond(json_response(body, 200))
                .expect("response should succeed");
        }
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    assert!(client.automake_models("landrover")?.is_empty());
    let models = client.automake_models("landrover")?;
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "Defender");

    handle.join().expect("server thread should join");
    Ok(())
}
