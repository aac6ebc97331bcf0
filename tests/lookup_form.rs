use imeicheck_cli::api::{LookupClient, LookupConfig, LookupError};
use imeicheck_cli::ui::{Shell, EMPTY_INPUT_MESSAGE};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::net::TcpListener;
use std::time::Duration;

const IMEI: &str = "356938035643809";

fn client_for(base_url: String) -> LookupClient {
    LookupClient::new(LookupConfig {
        base_url,
        timeout: Some(Duration::from_secs(5)),
    })
    .unwrap()
}

fn lookup_mock(server: &mut ServerGuard, identifier: &str, body: &str) -> Mock {
    server
        .mock("GET", "/api/modelBrandName")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("imei".into(), identifier.into()),
            Matcher::UrlEncoded("format".into(), "html".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
}

#[test]
fn check_sends_one_request_and_shows_normalized_text() {
    let mut server = Server::new();
    let mock = lookup_mock(&mut server, IMEI, "Brand: Acme<br>Model: X1<br><br>  ")
        .expect(1)
        .create();

    let mut shell = Shell::new(client_for(server.url()));
    shell.set_input(format!("  {IMEI}\n"));
    shell.check();

    mock.assert();
    assert_eq!(shell.display(), "Brand: Acme\nModel: X1");
}

#[test]
fn blank_input_makes_no_request() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let mut shell = Shell::new(client_for(server.url()));
    for input in ["", "   ", "\t\n"] {
        shell.set_input(input);
        shell.check();
        assert_eq!(shell.display(), EMPTY_INPUT_MESSAGE);
    }

    mock.assert();
}

#[test]
fn refused_connection_is_rendered_as_error_text() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut shell = Shell::new(client_for(format!("http://127.0.0.1:{port}")));
    shell.set_input(IMEI);
    shell.check();

    assert!(
        shell.display().starts_with("Error: "),
        "unexpected display: {}",
        shell.display()
    );
}

#[test]
fn error_status_is_rendered_as_error_text() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/modelBrandName")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("not found")
        .expect(1)
        .create();

    let client = client_for(server.url());
    let outcome = client.lookup(IMEI);
    mock.assert();

    let err = outcome.unwrap_err();
    assert!(matches!(err, LookupError::Request(ref e) if e.status().map(|s| s.as_u16()) == Some(404)));
    assert!(err.to_string().starts_with("Error: "));
    assert!(err.to_string().contains("404"));
}

#[test]
fn shell_stays_usable_after_a_failure() {
    let mut server = Server::new();
    let failing = server
        .mock("GET", "/api/modelBrandName")
        .match_query(Matcher::UrlEncoded("imei".into(), "bad".into()))
        .with_status(500)
        .create();
    let ok = lookup_mock(&mut server, IMEI, "Brand: Acme").create();

    let mut shell = Shell::new(client_for(server.url()));
    shell.set_input("bad");
    shell.check();
    assert!(shell.display().starts_with("Error: "));

    shell.set_input(IMEI);
    shell.check();
    assert_eq!(shell.display(), "Brand: Acme");

    failing.assert();
    ok.assert();
}

#[test]
fn clear_after_lookup_empties_field_and_display() {
    let mut server = Server::new();
    let _mock = lookup_mock(&mut server, IMEI, "Brand: Acme").create();

    let mut shell = Shell::new(client_for(server.url()));
    shell.set_input(IMEI);
    shell.check();
    assert_eq!(shell.display(), "Brand: Acme");

    shell.clear();
    assert_eq!(shell.input(), "");
    assert_eq!(shell.display(), "");
}

#[test]
fn repeated_check_replaces_display_with_same_text() {
    let mut server = Server::new();
    let mock = lookup_mock(&mut server, IMEI, "IMEI: 356938035643809<br>Brand: Acme")
        .expect(2)
        .create();

    let mut shell = Shell::new(client_for(server.url()));
    shell.set_input(IMEI);
    shell.check();
    let first = shell.display().to_string();
    shell.check();

    mock.assert();
    assert_eq!(first, "IMEI: 356938035643809\nBrand: Acme");
    assert_eq!(shell.display(), first);
}

#[test]
fn reserved_characters_reach_the_server_intact() {
    let identifier = "SN 12&format=json";
    let mut server = Server::new();
    let mock = lookup_mock(&mut server, identifier, "Brand: Acme")
        .expect(1)
        .create();

    let client = client_for(server.url());
    assert_eq!(client.lookup(identifier).unwrap(), "Brand: Acme");
    mock.assert();
}
