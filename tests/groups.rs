//
//  obs-api
//  tests/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use mockito::{Matcher, Server};
use obs_api::api::{Client, Error, Group, StatusCode, UserRef};

const AUTHORIZATION: &str = "Basic dXNlcjpwNHM1dzA3ZA==";

const OK_STATUS: &str = r#"<status code="ok">
    <summary>Ok</summary>
</status>"#;

fn client(server: &Server) -> Client {
    Client::builder()
        .base_url(server.url())
        .credentials("user", "p4s5w07d")
        .build()
        .unwrap()
}

#[test]
fn test_list_groups() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/group")
        .match_header("authorization", AUTHORIZATION)
        .match_header("accept", "application/xml")
        .with_status(200)
        .with_body(
            r#"
            <directory count="3">
                <entry name="foo"/>
                <entry name="bar"/>
                <entry name="baz"/>
            </directory>"#,
        )
        .create();

    let groups = client(&server).list_groups().unwrap();
    assert_eq!(groups, vec!["foo", "bar", "baz"]);
    mock.assert();
}

#[test]
fn test_list_groups_empty_directory() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/group")
        .with_status(200)
        .with_body(r#"<directory count="0"/>"#)
        .create();

    assert!(client(&server).list_groups().unwrap().is_empty());
    mock.assert();
}

#[test]
fn test_list_groups_with_json_body_is_decode_error() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/group")
        .match_header("authorization", AUTHORIZATION)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("\"foo\"\n")
        .create();

    let err = client(&server).list_groups().unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err:?}");
    assert!(err.to_string().contains("EOF"));
    mock.assert();
}

#[test]
fn test_get_group_members_in_document_order() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/group/foo")
        .match_header("authorization", AUTHORIZATION)
        .with_status(200)
        .with_body(
            r#"
            <group>
                <title>foo</title>
                <person>
                    <person userid="foo-member" />
                    <person userid="bar-member" />
                    <person userid="baz-member" />
                </person>
            </group>"#,
        )
        .create();

    let group = client(&server).get_group("foo").unwrap();
    assert_eq!(group.id, "foo");
    assert!(group.maintainer.is_empty());
    assert_eq!(
        group.members,
        vec![
            UserRef::new("foo-member"),
            UserRef::new("bar-member"),
            UserRef::new("baz-member"),
        ]
    );
    mock.assert();
}

#[test]
fn test_new_group_sends_empty_group() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/group/test-group")
        .match_header("authorization", AUTHORIZATION)
        .match_body("<group><title>test-group</title><person></person></group>")
        .with_status(200)
        .with_body(OK_STATUS)
        .create();

    client(&server).new_group("test-group").unwrap();
    mock.assert();
}

#[test]
fn test_update_group_sends_members() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/group/foo")
        .match_header("authorization", AUTHORIZATION)
        .match_body(concat!(
            "<group><title>foo</title><person>",
            r#"<person userid="foo-member"></person>"#,
            r#"<person userid="bar-member"></person>"#,
            r#"<person userid="baz-member"></person>"#,
            "</person></group>"
        ))
        .with_status(200)
        .with_body(OK_STATUS)
        .create();

    let group = Group {
        id: "foo".into(),
        members: vec![
            UserRef::new("foo-member"),
            UserRef::new("bar-member"),
            UserRef::new("baz-member"),
        ],
        ..Default::default()
    };
    client(&server).update_group(&group).unwrap();
    mock.assert();
}

#[test]
fn test_delete_group() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", "/group/test-group")
        .match_header("authorization", AUTHORIZATION)
        .with_status(200)
        .with_body(OK_STATUS)
        .create();

    client(&server).delete_group("test-group").unwrap();
    mock.assert();
}

#[test]
fn test_delete_missing_group_reports_summary() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", "/group/test-non-group")
        .match_header("authorization", AUTHORIZATION)
        .with_status(404)
        .with_body(
            r#"
            <status code="not_found">
                <summary>Couldn't find Group 'test-non-group'</summary>
            </status>"#,
        )
        .create();

    let err = client(&server).delete_group("test-non-group").unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(
        err.to_string().ends_with("Couldn't find Group 'test-non-group'"),
        "{err}"
    );
    assert!(err.to_string().starts_with("DELETE http://"), "{err}");

    let response = err.api_error().unwrap();
    assert_eq!(response.code, "not_found");
    assert!(!response.body.is_empty());
    mock.assert();
}

#[test]
fn test_add_group_member() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/group/test-group")
        .match_header("authorization", AUTHORIZATION)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("cmd".into(), "add_user".into()),
            Matcher::UrlEncoded("userid".into(), "test-user".into()),
        ]))
        .with_status(200)
        .with_body(OK_STATUS)
        .create();

    client(&server).add_group_member("test-group", "test-user").unwrap();
    mock.assert();
}

#[test]
fn test_remove_group_member() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/group/test-group")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("cmd".into(), "remove_user".into()),
            Matcher::UrlEncoded("userid".into(), "test-user".into()),
        ]))
        .with_status(200)
        .with_body(OK_STATUS)
        .create();

    client(&server).remove_group_member("test-group", "test-user").unwrap();
    mock.assert();
}

#[test]
fn test_set_group_email() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/group/test-group")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("cmd".into(), "set_email".into()),
            Matcher::UrlEncoded("email".into(), "group@example.com".into()),
        ]))
        .with_status(200)
        .with_body(OK_STATUS)
        .create();

    client(&server).set_group_email("test-group", "group@example.com").unwrap();
    mock.assert();
}

#[test]
fn test_unauthorized_without_status_document() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/group/test-group")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Unauthorized")
        .create();

    let err = client(&server).add_group_member("test-group", "x").unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(
        err.to_string()
            .ends_with("401 failed to parse unknown error format: 'Unauthorized'"),
        "{err}"
    );
    mock.assert();
}

#[test]
fn test_delete_group_with_dot_segment_sends_nothing() {
    let mut server = Server::new();
    let parent = server.mock("DELETE", Matcher::Any).expect(0).create();

    let client = Client::builder()
        .base_url(format!("{}/obs", server.url()))
        .build()
        .unwrap();
    for name in ["..", ".", "%2E%2E"] {
        let err = client.delete_group(name).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)), "{name}: {err:?}");
    }
    parent.assert();
}
