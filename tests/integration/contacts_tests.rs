use crate::common::{self, bearer};
use contacts_client::prelude::*;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};

fn contact_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phone": "555 123 4567",
        "company": "Acme",
        "notes": "",
        "created": "2025-03-01T10:00:00Z"
    })
}

fn form(name: &str) -> ContactFormData {
    ContactFormData {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555 123 4567".to_string(),
        company: "Acme".to_string(),
        notes: String::new(),
    }
}

fn logged_in(server: &ServerGuard) -> (Arc<HttpClient>, ContactsController<ContactServiceImpl>) {
    let client = common::create_logged_in_client(server, &CredentialPair::new("a1", "r1"));
    client.session().set_username(Some("ann")).unwrap();
    let controller = ContactsController::with_page_size(
        ContactServiceImpl::new(client.clone()),
        client.session().clone(),
        5,
    );
    (client, controller)
}

#[tokio::test]
async fn test_list_sends_window_as_query() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", CONTACTS_ENDPOINT)
        .match_header("authorization", bearer("a1").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("page_size".into(), "5".into()),
            Matcher::UrlEncoded("search".into(), "ann smith".into()),
            Matcher::UrlEncoded("ordering".into(), "-created".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "count": 7,
                "next": null,
                "previous": "http://api.test/contacts/?page=1",
                "results": [contact_json("6", "Ann"), contact_json("7", "Annie")]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let (_client, controller) = logged_in(&server);
    controller.set_search("ann smith").await;
    controller.set_ordering("-created").await;
    controller.set_page(2).await.unwrap();

    assert_eq!(controller.fetch().await.unwrap(), FetchOutcome::Applied);

    let state = controller.state().await;
    assert_eq!(state.total, 7);
    assert_eq!(state.total_pages(), 2);
    assert_eq!(state.contacts.len(), 2);
    assert_eq!(state.contacts[1].name, "Annie");
    list.assert_async().await;
}

#[tokio::test]
async fn test_create_posts_form_and_reloads_first_page() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", CONTACTS_ENDPOINT)
        .match_body(Matcher::Json(serde_json::to_value(form("Zed")).unwrap()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(contact_json("99", "Zed").to_string())
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", CONTACTS_ENDPOINT)
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "count": 1, "next": null, "previous": null, "results": [contact_json("99", "Zed")] })
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let (_client, controller) = logged_in(&server);
    controller.set_page(3).await.unwrap();

    let contact = controller.create(&form("Zed")).await.unwrap();

    assert_eq!(contact.id, "99");
    assert_eq!(controller.page().await, 1);
    assert_eq!(controller.contacts().await, vec![contact]);
    create.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn test_update_puts_to_contact_endpoint() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("PUT", "/contacts/7/")
        .match_body(Matcher::PartialJson(json!({ "name": "Renamed" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(contact_json("7", "Renamed").to_string())
        .expect(1)
        .create_async()
        .await;

    let (client, _) = logged_in(&server);
    let service = ContactServiceImpl::new(client);

    let contact = service.update_contact("7", &form("Renamed")).await.unwrap();

    assert_eq!(contact.name, "Renamed");
    assert!(contact.created_at().is_ok());
    update.assert_async().await;
}

#[tokio::test]
async fn test_delete_accepts_empty_response() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/contacts/7/")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let (client, _) = logged_in(&server);
    ContactServiceImpl::new(client)
        .delete_contact("7")
        .await
        .unwrap();

    delete.assert_async().await;
}

#[tokio::test]
async fn test_delete_not_found() {
    let mut server = Server::new_async().await;
    let _delete = server
        .mock("DELETE", "/contacts/404/")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "No Contact matches the given query." }).to_string())
        .create_async()
        .await;

    let (client, _) = logged_in(&server);
    let err = ContactServiceImpl::new(client)
        .delete_contact("404")
        .await
        .unwrap_err();

    assert_eq!(err.status(), 404);
    assert_eq!(err.to_string(), "http error 404: No Contact matches the given query.");
}

#[tokio::test]
async fn test_non_json_error_uses_status_text() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", CONTACTS_ENDPOINT)
        .match_query(Matcher::Any)
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html><body>upstream down</body></html>")
        .create_async()
        .await;

    let (_client, controller) = logged_in(&server);
    let err = controller.fetch().await.unwrap_err();

    assert_eq!(err.status(), 502);
    assert_eq!(err.to_string(), "http error 502: Bad Gateway");
    assert_eq!(err.payload(), Some(&json!({ "message": "Bad Gateway" })));
    assert!(controller.contacts().await.is_empty());
}

#[tokio::test]
async fn test_network_failure() {
    let session = Arc::new(Session::new(Arc::new(MemoryStorage::new()), "http://127.0.0.1:1"));
    session
        .set_tokens(Some(&CredentialPair::new("a1", "r1")))
        .unwrap();
    let client = HttpClient::new(&Config::with_base_url("http://127.0.0.1:1"), session).unwrap();

    let err = client
        .get::<ContactListResponse>(CONTACTS_ENDPOINT)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(err.status(), 0);
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_fetch_after_refresh_uses_new_token() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", CONTACTS_ENDPOINT)
        .match_header("authorization", bearer("a1").as_str())
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", CONTACTS_ENDPOINT)
        .match_header("authorization", bearer("a2").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "count": 1, "next": null, "previous": null, "results": [contact_json("1", "Ann")] })
                .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let refresh = common::mock_refresh(&mut server, "r1", "a2", 1).await;

    let (_client, controller) = logged_in(&server);

    assert_eq!(controller.fetch().await.unwrap(), FetchOutcome::Applied);
    assert_eq!(controller.fetch().await.unwrap(), FetchOutcome::Applied);

    assert_eq!(controller.total().await, 1);
    accepted.assert_async().await;
    refresh.assert_async().await;
}
