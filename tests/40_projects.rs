mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_project(server: &common::TestServer, token: &str, name: &str) -> Result<Value> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/projects", server.base_url))
        .bearer_auth(token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    Ok(res.json::<Value>().await?["data"].clone())
}

#[tokio::test]
async fn create_requires_name_and_defaults_color() -> Result<()> {
    let server = match common::server_with_db().await? {
        Some(s) => s,
        None => return Ok(()),
    };
    let token = common::register_user(server, "projval").await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/projects", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "description": "nameless" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"].as_object().expect("fields").contains_key("name"));

    let project = create_project(server, &token, "Apollo").await?;
    assert_eq!(project["color"], "#3B82F6");
    assert!(project["description"].is_null());
    Ok(())
}

#[tokio::test]
async fn partial_update_and_explicit_null_description() -> Result<()> {
    let server = match common::server_with_db().await? {
        Some(s) => s,
        None => return Ok(()),
    };
    let token = common::register_user(server, "projpatch").await?;
    let client = reqwest::Client::new();

    let project = create_project(server, &token, "Gemini").await?;
    let id = project["id"].as_str().expect("id");

    let res = client
        .put(format!("{}/api/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "description": "orbital" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?["data"].clone();
    assert_eq!(updated["description"], "orbital");
    assert_eq!(updated["name"], "Gemini");

    // null clears the description; omitting it would keep "orbital"
    let res = client
        .put(format!("{}/api/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "description": null, "color": "#111111" }))
        .send()
        .await?;
    let updated = res.json::<Value>().await?["data"].clone();
    assert!(updated["description"].is_null());
    assert_eq!(updated["color"], "#111111");
    Ok(())
}

#[tokio::test]
async fn deleting_a_project_detaches_its_tasks() -> Result<()> {
    let server = match common::server_with_db().await? {
        Some(s) => s,
        None => return Ok(()),
    };
    let token = common::register_user(server, "projdetach").await?;
    let client = reqwest::Client::new();

    let project = create_project(server, &token, "Doomed").await?;
    let project_id = project["id"].as_str().expect("id");

    let res = client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "survivor",
            "due_date": "2030-06-01T00:00:00Z",
            "project": project_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let task = res.json::<Value>().await?["data"].clone();
    assert_eq!(task["project_id"].as_str(), Some(project_id));
    let task_id = task["id"].as_str().expect("task id");

    let res = client
        .delete(format!("{}/api/projects/{}", server.base_url, project_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Task survives with its project reference cleared
    let res = client
        .get(format!("{}/api/tasks/{}", server.base_url, task_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let task = res.json::<Value>().await?["data"].clone();
    assert_eq!(task["title"], "survivor");
    assert!(task["project_id"].is_null());
    Ok(())
}

#[tokio::test]
async fn project_task_listing_is_scoped() -> Result<()> {
    let server = match common::server_with_db().await? {
        Some(s) => s,
        None => return Ok(()),
    };
    let owner = common::register_user(server, "projowner").await?;
    let intruder = common::register_user(server, "projintruder").await?;
    let client = reqwest::Client::new();

    let project = create_project(server, &owner, "Scoped").await?;
    let project_id = project["id"].as_str().expect("id");

    client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&owner)
        .json(&json!({
            "title": "in project",
            "due_date": "2030-06-01T00:00:00Z",
            "project": project_id
        }))
        .send()
        .await?;

    let res = client
        .get(format!("{}/api/projects/{}/tasks", server.base_url, project_id))
        .bearer_auth(&owner)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let tasks = res.json::<Value>().await?["data"].as_array().expect("array").clone();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "in project");

    // Foreign project id: the listing 404s instead of returning empty
    let res = client
        .get(format!("{}/api/projects/{}/tasks", server.base_url, project_id))
        .bearer_auth(&intruder)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/api/projects/{}", server.base_url, project_id))
        .bearer_auth(&intruder)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
