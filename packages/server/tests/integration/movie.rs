use sea_orm::EntityTrait;
use serde_json::json;

use movies_api::entity::movie;

use crate::common::{TestApp, routes};

fn dune() -> serde_json::Value {
    json!({
        "title": "Dune",
        "director": "Denis Villeneuve",
        "year": 2021,
        "rating": 8.5,
    })
}

mod create_movie {
    use super::*;

    #[tokio::test]
    async fn returns_created_movie_without_image() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::MOVIES, &dune()).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.id(), 1);
        assert_eq!(res.body["title"], "Dune");
        assert_eq!(res.body["director"], "Denis Villeneuve");
        assert_eq!(res.body["year"], 2021);
        assert_eq!(res.body["rating"], 8.5);
        assert!(res.body["image_url"].is_null());
        assert!(res.body["created_at"].is_string());
        assert!(res.body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn ids_are_unique_and_immediately_retrievable() {
        let app = TestApp::spawn().await;

        let a = app.create_movie("Arrival").await;
        let b = app.create_movie("Sicario").await;
        assert_ne!(a, b);

        let res = app.get(&routes::movie(b)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Sicario");
    }

    #[tokio::test]
    async fn trims_text_fields() {
        let app = TestApp::spawn().await;
        let mut body = dune();
        body["title"] = json!("  Dune  ");

        let res = app.post(routes::MOVIES, &body).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "Dune");
    }

    #[tokio::test]
    async fn rejects_blank_title() {
        let app = TestApp::spawn().await;
        let mut body = dune();
        body["title"] = json!("   ");

        let res = app.post(routes::MOVIES, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_missing_field() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::MOVIES, &json!({ "title": "Dune", "year": 2021 }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod list_movies {
    use super::*;

    #[tokio::test]
    async fn trailing_slash_lists_and_creates() {
        let app = TestApp::spawn().await;

        let created = app.post(routes::MOVIES_SLASH, &dune()).await;
        assert_eq!(created.status, 201);

        let res = app.get(routes::MOVIES_SLASH).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 1);
        assert_eq!(res.body[0]["title"], "Dune");
    }

    #[tokio::test]
    async fn empty_catalog_returns_empty_array() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::MOVIES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn returns_all_movies_in_id_order() {
        let app = TestApp::spawn().await;
        app.create_movie("First").await;
        app.create_movie("Second").await;
        app.create_movie("Third").await;

        let res = app.get(routes::MOVIES).await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }
}

mod get_movie {
    use super::*;

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::movie(42)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn non_numeric_id_is_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get("/movies/abc").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod wire_format {
    use super::*;

    #[tokio::test]
    async fn movie_id_is_serialized_as_uppercase_key() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app.get(&routes::movie(id)).await;

        assert_eq!(res.status, 200);
        let body = res.body.as_object().unwrap();
        assert_eq!(body["ID"], id);
        assert!(!body.contains_key("id"));
        for key in ["title", "director", "year", "rating", "image_url"] {
            assert!(body.contains_key(key), "missing {key}");
        }
    }

    #[tokio::test]
    async fn error_message_is_under_error_key() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::movie(404)).await;

        assert_eq!(res.status, 404);
        assert!(res.body["error"].as_str().is_some_and(|m| !m.is_empty()));
        assert!(res.body.get("message").is_none());
    }
}

mod update_movie {
    use super::*;

    #[tokio::test]
    async fn partial_update_changes_only_present_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app.put(&routes::movie(id), &json!({ "rating": 9.0 })).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["rating"], 9.0);
        assert_eq!(res.body["title"], "Dune");
        assert_eq!(res.body["director"], "Denis Villeneuve");
        assert_eq!(res.body["year"], 2021);
    }

    #[tokio::test]
    async fn patch_behaves_like_put() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app
            .patch(&routes::movie(id), &json!({ "title": "Dune: Part One" }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Dune: Part One");

        let fetched = app.get(&routes::movie(id)).await;
        assert_eq!(fetched.body["title"], "Dune: Part One");
    }

    #[tokio::test]
    async fn empty_body_leaves_movie_unchanged() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;
        let before = app.get(&routes::movie(id)).await;

        let res = app.put(&routes::movie(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, before.body);
    }

    #[tokio::test]
    async fn image_url_is_not_patchable() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app
            .put(&routes::movie(id), &json!({ "image_url": "../../etc/passwd" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        let fetched = app.get(&routes::movie(id)).await;
        assert!(fetched.body["image_url"].is_null());
    }

    #[tokio::test]
    async fn unknown_id_is_internal_error() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::movie(7), &json!({ "rating": 1.0 })).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.code(), "INTERNAL_ERROR");
    }
}

mod delete_movie {
    use super::*;

    #[tokio::test]
    async fn removes_movie_record() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app.delete(&routes::movie(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Movie has been deleted");
        assert_eq!(app.get(&routes::movie(id)).await.status, 404);
        let row = movie::Entity::find_by_id(id).one(&app.db).await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn without_image_leaves_upload_dir_untouched() {
        let app = TestApp::spawn().await;
        let keep = app.create_movie("Keep").await;
        app.upload_image(keep, "cover.png", b"PNG".to_vec()).await;
        let id = app.create_movie("Dune").await;
        let before = app.stored_images();

        let res = app.delete(&routes::movie(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(app.stored_images(), before);
    }

    #[tokio::test]
    async fn unknown_id_is_internal_error() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::movie(3)).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.code(), "INTERNAL_ERROR");
    }
}
