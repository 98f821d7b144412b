mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_and_fetch_clinic() -> Result<()> {
    let app = TestApp::new();

    let (status, created) = app
        .call(
            Method::POST,
            "/clinicas",
            None,
            Some(json!({ "nomeFantasia": "Clínica Norte", "subdominio": "clinica-a" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "body: {created}");
    assert_eq!(created["ativo"], true);
    assert!(created.get("createdAt").is_some(), "missing createdAt: {created}");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app.call(Method::GET, &format!("/clinicas/{id}"), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["nomeFantasia"], "Clínica Norte");
    assert_eq!(fetched["subdominio"], "clinica-a");

    Ok(())
}

#[tokio::test]
async fn duplicate_subdomain_is_conflict() -> Result<()> {
    let app = TestApp::new();
    app.clinica("Clínica A", "clinica-a").await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/clinicas",
            None,
            Some(json!({ "nomeFantasia": "Outra", "subdominio": "clinica-a" })),
        )
        .await?;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Subdomínio já está em uso: clinica-a");
    Ok(())
}

#[tokio::test]
async fn invalid_body_lists_every_field() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .call(Method::POST, "/clinicas", None, Some(json!({ "subdominio": "Clinica A" })))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["nomeFantasia"], "O nome fantasia é obrigatório");
    assert_eq!(
        body["field_errors"]["subdominio"],
        "Subdomínio deve conter apenas letras minúsculas, números e hífens"
    );
    Ok(())
}

#[tokio::test]
async fn null_fields_are_validation_errors() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .call(
            Method::POST,
            "/clinicas",
            None,
            Some(json!({ "nomeFantasia": null, "subdominio": null })),
        )
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["nomeFantasia"], "O nome fantasia é obrigatório");
    assert_eq!(body["field_errors"]["subdominio"], "O subdomínio é obrigatório");
    Ok(())
}

#[tokio::test]
async fn subdomain_longer_than_column_is_rejected() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .call(
            Method::POST,
            "/clinicas",
            None,
            Some(json!({ "nomeFantasia": "Clínica Longa", "subdominio": "a".repeat(70) })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["field_errors"]["subdominio"],
        "O subdomínio deve ter no máximo 63 caracteres"
    );

    let (status, _) = app
        .call(
            Method::POST,
            "/clinicas",
            None,
            Some(json!({ "nomeFantasia": "Clínica Longa", "subdominio": "a".repeat(63) })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/clinicas")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"nomeFantasia\":"))?;
    let (status, body) = app.send(request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn update_and_delete_clinic() -> Result<()> {
    let app = TestApp::new();
    let id = app.clinica("Clínica A", "clinica-a").await?;
    app.clinica("Clínica B", "clinica-b").await?;

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/clinicas/{id}"),
            None,
            Some(json!({ "nomeFantasia": "Clínica A", "subdominio": "clinica-b" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = app
        .call(
            Method::PUT,
            &format!("/clinicas/{id}"),
            None,
            Some(json!({ "nomeFantasia": "Clínica A Centro", "subdominio": "clinica-a", "ativo": false })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nomeFantasia"], "Clínica A Centro");
    assert_eq!(updated["ativo"], false);

    let (status, _) = app.call(Method::DELETE, &format!("/clinicas/{id}"), None, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.call(Method::DELETE, &format!("/clinicas/{id}"), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Clínica não encontrada para exclusão com ID: {id}"));
    Ok(())
}

#[tokio::test]
async fn admin_users_listed_per_clinic_and_across_clinics() -> Result<()> {
    let app = TestApp::new();
    let norte = app.clinica("Clínica Norte", "norte").await?;
    let sul = app.clinica("Clínica Sul", "sul").await?;

    for (clinica, nome) in [(norte, "Ana Souza"), (sul, "Mariana Lima"), (sul, "Bruno Costa")] {
        let (status, _) = app
            .call(Method::POST, "/usuarios-admin", Some(clinica), Some(json!({ "nome": nome })))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .call(Method::GET, &format!("/clinicas/{sul}/usuarios-admin"), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, body) = app
        .call(Method::GET, "/clinicas/usuarios-admin?nome=ANA", None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let nomes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["nome"].as_str())
        .collect();
    assert_eq!(nomes, vec!["Ana Souza", "Mariana Lima"]);

    let (status, _) = app.call(Method::GET, "/clinicas/999/usuarios-admin", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn admin_user_lookup_by_id_needs_no_clinic() -> Result<()> {
    let app = TestApp::new();
    let sul = app.clinica("Clínica Sul", "sul").await?;
    let (_, created) = app
        .call(Method::POST, "/usuarios-admin", Some(sul), Some(json!({ "nome": "Mariana Lima" })))
        .await?;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .call(Method::GET, &format!("/clinicas/usuarios-admin/{id}"), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "Mariana Lima");
    assert_eq!(body["clinicaId"], sul);

    let (status, body) = app
        .call(Method::GET, "/clinicas/usuarios-admin/999", None, None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Usuário administrador não encontrado com ID: 999");
    Ok(())
}

#[tokio::test]
async fn health_and_banner_answer() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.call(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = app.call(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    Ok(())
}
