//! Document round trips through a scratch database.

use super::common::{connect, scratch_db};
use couchrest::QueryParams;
use serde_json::json;

#[tokio::test]
#[ignore]
async fn test_document_crud() {
    let conn = connect();
    let db = scratch_db(&conn, "couchrest-docs").await;

    let created = db
        .put("doc1", Some(json!({"title": "Blue Train", "year": 1957})), None)
        .await
        .expect("PUT document should succeed");
    assert_eq!(created.status(), 201);
    let rev = created.data().unwrap()["rev"]
        .as_str()
        .expect("rev should be a string")
        .to_string();

    let fetched = db.get("doc1", None).await.expect("GET document should succeed");
    assert_eq!(fetched.data().unwrap()["title"], "Blue Train");
    assert_eq!(fetched.data().unwrap()["_rev"], rev.as_str());

    let conflict = db
        .put("doc1", Some(json!({"title": "stale"})), None)
        .await
        .expect_err("PUT without rev should conflict");
    assert_eq!(conflict.status_code(), Some(409));

    db.delete("doc1", Some(QueryParams::new().param("rev", rev)))
        .await
        .expect("DELETE document should succeed");

    let err = db.get("doc1", None).await.expect_err("deleted document");
    assert!(err.is_not_found());

    conn.delete_db(db.name()).await.expect("cleanup should succeed");
}

#[tokio::test]
#[ignore]
async fn test_post_and_all_docs() {
    let conn = connect();
    let db = scratch_db(&conn, "couchrest-alldocs").await;

    let posted = db
        .post("", Some(json!({"kind": "album"})), None)
        .await
        .expect("POST document should succeed");
    let id = posted.data().unwrap()["id"].as_str().unwrap().to_string();

    let all = db
        .get("_all_docs", Some(QueryParams::new().param("include_docs", "true")))
        .await
        .expect("_all_docs should succeed");
    let rows = all.data().unwrap()["rows"].as_array().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], id.as_str());
    assert_eq!(rows[0]["doc"]["kind"], "album");

    let info = db.info().await.expect("database info should succeed");
    assert_eq!(info.data().unwrap()["doc_count"], 1);

    conn.delete_db(db.name()).await.expect("cleanup should succeed");
}
