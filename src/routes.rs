use crate::{
    routes::{
        add_student::{get_add_student_form, post_add_student},
        edit_student::{get_edit_student_form, post_edit_student},
        index::{get_index_route, get_search},
        profile::{get_profile, post_remarks},
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub mod add_student;
pub mod edit_student;
pub mod index;
pub mod profile;

pub fn router(state: RosterState) -> Router {
    let trace_layer = TraceLayer::new_for_http();

    Router::new()
        .route("/", get(get_index_route))
        .route("/search", get(get_search))
        .route("/profile/{id}", get(get_profile))
        .route("/profile/{id}/remarks", post(post_remarks))
        .route(
            "/profile/{id}/edit",
            get(get_edit_student_form).post(post_edit_student),
        )
        .route(
            "/add_student",
            get(get_add_student_form).post(post_add_student),
        )
        .layer(trace_layer)
        .with_state(state)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::data::{StudentStore, memory_store::MemoryStudentStore, student::StudentId};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    pub fn memory_state() -> (RosterState, Arc<MemoryStudentStore>) {
        let store = Arc::new(MemoryStudentStore::new());
        (RosterState::with_store(store.clone()), store)
    }

    async fn send(app: Router, request: Request<Body>) -> Response {
        app.oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn profile_status_codes() {
        let (state, store) = memory_state();
        let app = router(state);

        let response = send(app.clone(), get_request("/profile/not-an-id")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("Invalid student ID"));

        let unassigned = StudentId::generate();
        let response = send(app.clone(), get_request(&format!("/profile/{unassigned}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let id = store
            .insert_raw(serde_json::json!({"name": "Alice", "age": 19, "course": "Art"}))
            .await;
        let response = send(app, get_request(&format!("/profile/{id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Alice"));
        assert!(page.contains("Art"));
    }

    #[tokio::test]
    async fn add_then_edit_scenario() {
        let (state, store) = memory_state();
        let app = router(state);

        let response = send(
            app.clone(),
            form_request("/add_student", "name=Carla&age=22&course=Math&remarks="),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let list = body_text(send(app.clone(), get_request("/")).await).await;
        assert_eq!(list.matches(">Carla<").count(), 1);
        assert!(list.contains("22"));
        assert!(list.contains("Math"));

        let id = store.list_all().await.unwrap()[0].id;
        let response = send(
            app.clone(),
            form_request(
                &format!("/profile/{id}/edit"),
                "name=Carla&age=22&course=Chemistry&remarks=",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            format!("/profile/{id}").as_str()
        );

        let student = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.course, "Chemistry");
        assert_eq!(student.name, "Carla");
        assert_eq!(student.age, 22);
        assert_eq!(student.remarks, "");
    }

    #[tokio::test]
    async fn add_without_remarks_field_defaults_to_empty() {
        let (state, store) = memory_state();
        let app = router(state);

        let response = send(
            app,
            form_request("/add_student", "name=Dana&age=30&course=Law"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let students = store.list_all().await.unwrap();
        assert_eq!(students[0].remarks, "");
    }

    #[tokio::test]
    async fn add_with_bad_age_is_a_bad_request() {
        let (state, store) = memory_state();
        let app = router(state);

        let response = send(
            app,
            form_request("/add_student", "name=Dana&age=thirty&course=Law"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_defaults_to_everyone() {
        let (state, store) = memory_state();
        let app = router(state);
        for name in ["Alice", "Bob"] {
            store
                .insert_raw(serde_json::json!({"name": name, "age": 20, "course": "Art"}))
                .await;
        }

        let page = body_text(send(app.clone(), get_request("/search")).await).await;
        assert!(page.contains("Alice") && page.contains("Bob"));

        let page = body_text(send(app, get_request("/search?name=bo")).await).await;
        assert!(!page.contains("Alice") && page.contains("Bob"));
    }

    #[tokio::test]
    async fn remarks_round_trip_through_the_router() {
        let (state, store) = memory_state();
        let app = router(state);
        let id = store
            .insert_raw(serde_json::json!({"name": "Alice", "age": 19, "course": "Art"}))
            .await;

        let response = send(
            app.clone(),
            form_request(&format!("/profile/{id}/remarks"), "remarks=Great+work"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let page = body_text(send(app.clone(), get_request(&format!("/profile/{id}"))).await).await;
        assert!(page.contains("Great work"));

        let response = send(app, form_request("/profile/nope/remarks", "remarks=x")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.starts_with("An error occurred"));
    }

    #[tokio::test]
    async fn partial_documents_do_not_break_listings() {
        let (state, store) = memory_state();
        let app = router(state);
        store
            .insert_raw(serde_json::json!({"name": "Alice", "age": 19, "course": "Art"}))
            .await;
        store
            .insert_raw(serde_json::json!({"name": "Legacy", "age": 20}))
            .await;
        store
            .insert_raw(serde_json::json!({"name": "Mongo", "age": 22.0, "course": "Math"}))
            .await;

        for uri in ["/", "/search", "/search?name=o"] {
            let response = send(app.clone(), get_request(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let page = body_text(response).await;
            assert!(page.contains(">Mongo<"), "{uri}");
            assert!(!page.contains(">Legacy<"), "{uri}");
        }

        let page = body_text(send(app, get_request("/")).await).await;
        assert!(page.contains(">Alice<"));
    }

    #[tokio::test]
    async fn add_form_renders() {
        let (state, _store) = memory_state();

        let response = send(router(state), get_request("/add_student")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Add New Student"));
    }
}
