use crate::common::{TEST_MAX_IMAGE_SIZE, TestApp, routes};

/// True for `uploads/img_<16 alphanumerics><ext>`.
fn is_generated_image_url(url: &str, ext: &str) -> bool {
    let Some(rest) = url.strip_prefix("uploads/img_") else {
        return false;
    };
    let Some(token) = rest.strip_suffix(ext) else {
        return false;
    };
    token.len() == 16 && token.chars().all(|c| c.is_ascii_alphanumeric())
}

mod upload_image {
    use super::*;

    #[tokio::test]
    async fn stores_file_and_sets_image_url() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app.upload_image(id, "poster.png", b"PNG_DATA".to_vec()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let url = res.body["image_url"].as_str().unwrap();
        assert!(is_generated_image_url(url, ".png"), "unexpected url {url}");
        assert_eq!(std::fs::read(app.image_path(url)).unwrap(), b"PNG_DATA");

        let fetched = app.get(&routes::movie(id)).await;
        assert_eq!(fetched.body["image_url"], url);
    }

    #[tokio::test]
    async fn stored_image_is_served_under_upload_prefix() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;
        let res = app.upload_image(id, "poster.jpg", b"JPEG_DATA".to_vec()).await;
        let url = res.body["image_url"].as_str().unwrap().to_string();

        let served = app.get(&format!("/{url}")).await;

        assert_eq!(served.status, 200);
        assert_eq!(served.text, "JPEG_DATA");
    }

    #[tokio::test]
    async fn reupload_leaves_exactly_one_file() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let first = app.upload_image(id, "a.png", b"first".to_vec()).await;
        let second = app.upload_image(id, "b.jpg", b"second".to_vec()).await;

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);
        let old_url = first.body["image_url"].as_str().unwrap();
        let new_url = second.body["image_url"].as_str().unwrap();
        assert_ne!(old_url, new_url);
        assert!(!app.image_path(old_url).exists());
        assert!(app.image_path(new_url).exists());
        assert_eq!(app.stored_images().len(), 1);
    }

    #[tokio::test]
    async fn file_without_extension_gets_bare_name() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app.upload_image(id, "poster", b"RAW".to_vec()).await;

        assert_eq!(res.status, 200);
        let url = res.body["image_url"].as_str().unwrap();
        assert!(is_generated_image_url(url, ""), "unexpected url {url}");
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.upload_image(99, "poster.png", b"PNG".to_vec()).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
        assert!(app.stored_images().is_empty());
    }

    #[tokio::test]
    async fn missing_image_field_is_validation_error() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app
            .upload_field(&routes::movie_upload(id), "file", "poster.png", b"PNG".to_vec())
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert!(app.stored_images().is_empty());
    }

    #[tokio::test]
    async fn hidden_filename_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        let res = app.upload_image(id, ".png", b"PNG".to_vec()).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        let fetched = app.get(&routes::movie(id)).await;
        assert!(fetched.body["image_url"].is_null());
    }

    #[tokio::test]
    async fn malformed_extension_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;

        for name in ["poster.", "my poster.jpeg-large", "cover.averyveryverylongext"] {
            let res = app.upload_image(id, name, b"PNG".to_vec()).await;
            assert_eq!(res.status, 400, "{name} should be rejected");
            assert_eq!(res.code(), "VALIDATION_ERROR");
        }
        assert!(app.stored_images().is_empty());
    }

    #[tokio::test]
    async fn oversized_image_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;
        let data = vec![0u8; TEST_MAX_IMAGE_SIZE as usize + 1];

        let res = app.upload_image(id, "huge.png", data).await;

        assert_eq!(res.status, 413);
        assert_eq!(res.code(), "PAYLOAD_TOO_LARGE");
        assert!(app.stored_images().is_empty());
    }
}

mod delete_with_image {
    use super::*;

    #[tokio::test]
    async fn dune_scenario_removes_file() {
        let app = TestApp::spawn().await;

        let id = app.create_movie("Dune").await;
        assert_eq!(id, 1);
        let created = app.get(&routes::movie(id)).await;
        assert_eq!(created.body["title"], "Dune");

        let uploaded = app.upload_image(id, "dune.png", b"SAND".to_vec()).await;
        assert_eq!(uploaded.status, 200);
        let url = uploaded.body["image_url"].as_str().unwrap().to_string();
        assert!(is_generated_image_url(&url, ".png"));
        let path = app.image_path(&url);
        assert!(path.exists());

        let deleted = app.delete(&routes::movie(id)).await;
        assert_eq!(deleted.status, 200);

        assert_eq!(app.get(&routes::movie(id)).await.status, 404);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn already_missing_file_does_not_block_delete() {
        let app = TestApp::spawn().await;
        let id = app.create_movie("Dune").await;
        let uploaded = app.upload_image(id, "dune.png", b"SAND".to_vec()).await;
        let url = uploaded.body["image_url"].as_str().unwrap();
        std::fs::remove_file(app.image_path(url)).unwrap();

        let res = app.delete(&routes::movie(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(app.get(&routes::movie(id)).await.status, 404);
    }
}
