use crate::{
    data::{
        StudentStore,
        student::{NewStudent, Student, StudentForm, StudentId},
    },
    error::{MissingStudentSnafu, RosterError, RosterResult},
    maud_conveniences::{simple_form_element, submit_button, textarea_form_element, title},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use maud::{Markup, html};
use snafu::OptionExt;

pub async fn get_edit_student_form(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> RosterResult<Markup> {
    let id: StudentId = id.parse()?;
    let student = state
        .find_by_id(id)
        .await?
        .context(MissingStudentSnafu { id })?;

    Ok(state.render(render_edit_form(&student)))
}

pub async fn post_edit_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    Form(form): Form<StudentForm>,
) -> RosterResult<Redirect> {
    let new_student = NewStudent::try_from(form)?;
    let id = id
        .parse::<StudentId>()
        .map_err(RosterError::into_server_fault)?;

    state
        .update_full(id, new_student)
        .await
        .map_err(RosterError::into_server_fault)?;

    info!(%id, "Edited student");
    Ok(Redirect::to(&format!("/profile/{id}")))
}

fn render_edit_form(student: &Student) -> Markup {
    let age = student.age.to_string();

    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            (title(html! {"Edit " (student.name)}))

            form action={"/profile/" (student.id) "/edit"} method="post" class="p-4" {
                (simple_form_element("name", "Name", true, None, Some(student.name.as_str())))
                (simple_form_element("age", "Age", true, Some("number"), Some(age.as_str())))
                (simple_form_element("course", "Course", true, None, Some(student.course.as_str())))
                (textarea_form_element("remarks", "Remarks", &student.remarks))
                (submit_button("Save Changes"))
            }

            a href={"/profile/" (student.id)} class="text-blue-400 hover:underline" {"Cancel"}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::memory_state;
    use axum::{http::StatusCode, response::IntoResponse};

    fn carla() -> NewStudent {
        NewStudent {
            name: "Carla".into(),
            age: 22,
            course: "Math".into(),
            remarks: "Top of the class".into(),
        }
    }

    fn form(name: &str, age: &str, course: &str, remarks: &str) -> StudentForm {
        StudentForm {
            name: name.into(),
            age: age.into(),
            course: course.into(),
            remarks: remarks.into(),
        }
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let (state, store) = memory_state();
        let id = store.insert(carla()).await.unwrap();

        let page = get_edit_student_form(State(state), Path(id.to_string()))
            .await
            .unwrap()
            .into_string();

        assert!(page.contains("value=\"Carla\""));
        assert!(page.contains("value=\"22\""));
        assert!(page.contains("value=\"Math\""));
        assert!(page.contains("Top of the class"));
        assert!(page.contains(&format!("action=\"/profile/{id}/edit\"")));
    }

    #[tokio::test]
    async fn edit_form_for_unknown_student_is_not_found() {
        let (state, _store) = memory_state();

        let err = get_edit_student_form(State(state), Path(StudentId::generate().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn submit_overwrites_and_redirects_to_profile() {
        let (state, store) = memory_state();
        let id = store.insert(carla()).await.unwrap();

        let response = post_edit_student(
            State(state),
            Path(id.to_string()),
            Form(form("Bob", "20", "Physics", "")),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            format!("/profile/{id}").as_str()
        );

        let student = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(
            (student.name.as_str(), student.age, student.course.as_str(), student.remarks.as_str()),
            ("Bob", 20, "Physics", "")
        );
    }

    #[tokio::test]
    async fn changing_only_the_course_keeps_the_rest() {
        let (state, store) = memory_state();
        let id = store.insert(carla()).await.unwrap();

        post_edit_student(
            State(state),
            Path(id.to_string()),
            Form(form("Carla", "22", "Chemistry", "Top of the class")),
        )
        .await
        .unwrap();

        let student = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.course, "Chemistry");
        assert_eq!(student.name, "Carla");
        assert_eq!(student.age, 22);
        assert_eq!(student.remarks, "Top of the class");
    }

    #[tokio::test]
    async fn non_integer_age_is_a_bad_request() {
        let (state, store) = memory_state();
        let id = store.insert(carla()).await.unwrap();

        let err = post_edit_student(
            State(state),
            Path(id.to_string()),
            Form(form("Carla", "old", "Math", "")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().age, 22);
    }

    #[tokio::test]
    async fn malformed_or_unknown_id_is_a_server_fault() {
        let (state, _store) = memory_state();

        for id in ["not-an-id".to_string(), StudentId::generate().to_string()] {
            let err = post_edit_student(
                State(state.clone()),
                Path(id),
                Form(form("Bob", "20", "Physics", "")),
            )
            .await
            .unwrap_err();

            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
