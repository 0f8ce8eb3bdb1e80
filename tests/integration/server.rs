//! Server-level calls: welcome, _all_dbs, _session, database lifecycle.

use super::common::{connect, unique_db_name};
use couchrest::OpenOptions;

#[tokio::test]
#[ignore]
async fn test_server_welcome() {
    let conn = connect();

    let welcome = conn.get("/", None).await.expect("GET / should succeed");
    assert_eq!(welcome.status(), 200);
    assert_eq!(welcome.data().unwrap()["couchdb"], "Welcome");
    assert!(welcome.data().unwrap()["version"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_missing_path_is_not_found() {
    let conn = connect();

    let err = conn
        .get(&unique_db_name("missing"), None)
        .await
        .expect_err("unknown database should fail");
    assert!(err.is_not_found());
    assert_eq!(
        err.couch_error().unwrap().data().unwrap()["error"],
        "not_found"
    );
}

#[tokio::test]
#[ignore]
async fn test_session_reports_user() {
    let conn = connect();

    if conn.uses_cookie_auth() {
        let login = conn.login().await.expect("login should succeed");
        assert!(login.ok);
    }

    let session = conn.session().await.expect("GET /_session should succeed");
    assert!(session.ok);
}

#[tokio::test]
#[ignore]
async fn test_database_lifecycle() {
    let conn = connect();
    let name = unique_db_name("couchrest-lifecycle");

    let err = conn
        .open_db(&name, OpenOptions::existing())
        .await
        .expect_err("database should not exist yet");
    assert!(err.is_not_found());

    let db = conn
        .open_db(&name, OpenOptions::default())
        .await
        .expect("open_db should create the database");
    assert!(db.exists().await.unwrap());

    let dbs = conn.all_dbs().await.expect("_all_dbs should succeed");
    assert!(dbs.contains(&name));

    // A second open finds the existing database.
    conn.open_db(&name, OpenOptions::default())
        .await
        .expect("open_db on an existing database should succeed");

    conn.delete_db(&name).await.expect("delete should succeed");
    assert!(!db.exists().await.unwrap());
}
