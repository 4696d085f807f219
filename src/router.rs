use axum::{Router, middleware::from_fn, middleware::from_fn_with_state};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState,
    middleware::{log_errors, rate_limit},
};

/// 静态资源服务，带单页应用回退
///
/// 存在的文件原样返回（目录返回其 `index.html`），其余路径一律返回入口文档，
/// 由前端路由处理。
pub fn create_router(state: &AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(state.config.index_file()));

    // 限流在最外层，被拒绝的请求不会触达文件服务
    let router = Router::new()
        .fallback_service(static_files)
        .layer(from_fn(log_errors))
        .layer(from_fn_with_state(state.rate_limiter.clone(), rate_limit));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::net::SocketAddr;
    use std::path::Path;

    use axum::{
        body::{Body, to_bytes},
        extract::ConnectInfo,
        http::{Method, Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::Config,
        middleware::{LIMIT_HEADER, REMAINING_HEADER},
    };

    const INDEX: &str = "<!doctype html><div id=\"root\"></div>";
    const DOCS_INDEX: &str = "<!doctype html><h1>docs</h1>";

    fn write_bundle(dir: &Path) {
        fs::write(dir.join("index.html"), INDEX).unwrap();
        fs::create_dir_all(dir.join("assets")).unwrap();
        fs::write(dir.join("assets/app.js"), "console.log('hero');").unwrap();
        fs::create_dir_all(dir.join("docs")).unwrap();
        fs::write(dir.join("docs/index.html"), DOCS_INDEX).unwrap();
    }

    fn state_for(dir: &Path, max_requests: u32) -> AppState {
        AppState::new(Config {
            static_dir: dir.to_path_buf(),
            rate_limit_requests: max_requests,
            ..Config::default()
        })
    }

    fn get(uri: &str, peer: &str) -> Request<Body> {
        let mut req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        req
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_existing_asset() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let app = create_router(&state_for(dir.path(), 100));

        let response = app.oneshot(get("/assets/app.js", "127.0.0.1:4000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
        assert!(content_type.contains("javascript"), "{}", content_type);
        assert_eq!(body_string(response).await, "console.log('hero');");
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let app = create_router(&state_for(dir.path(), 100));

        for uri in ["/", "/projects", "/deep/client/route?tab=2", "/assets/missing.css"] {
            let response = app.clone().oneshot(get(uri, "127.0.0.1:4000")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            assert_eq!(body_string(response).await, INDEX, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_rejects_client_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let app = create_router(&state_for(dir.path(), 3));

        for expected in ["2", "1", "0"] {
            let response = app.clone().oneshot(get("/", "10.1.1.1:1000")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[LIMIT_HEADER], "3");
            assert_eq!(response.headers()[REMAINING_HEADER], expected);
        }

        let response = app.clone().oneshot(get("/", "10.1.1.1:1001")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["code"], 1005);

        // 其他客户端不受影响
        let response = app.oneshot(get("/", "10.1.1.2:1000")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_directory_serves_its_index() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let app = create_router(&state_for(dir.path(), 100));

        let response = app.oneshot(get("/docs/", "127.0.0.1:4000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, DOCS_INDEX);
    }

    #[tokio::test]
    async fn test_non_get_methods_are_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path());
        let app = create_router(&state_for(dir.path(), 100));

        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let mut req = get("/projects", "127.0.0.1:4000");
            *req.method_mut() = method.clone();

            let response = app.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
            assert_ne!(body_string(response).await, INDEX, "{}", method);
        }

        // HEAD 与 GET 一样走回退页
        let mut req = get("/projects", "127.0.0.1:4000");
        *req.method_mut() = Method::HEAD;
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_bundle_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(&state_for(dir.path(), 100));

        let response = app.oneshot(get("/anything", "127.0.0.1:4000")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
