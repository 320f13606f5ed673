use crate::{
    data::{
        StudentStore,
        student::{NewStudent, StudentForm},
    },
    error::RosterResult,
    maud_conveniences::{simple_form_element, submit_button, textarea_form_element, title},
    state::RosterState,
};
use axum::{Form, extract::State, response::Redirect};
use maud::{Markup, html};

pub async fn get_add_student_form(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            (title("Add New Student"))

            form action="/add_student" method="post" class="p-4" {
                (simple_form_element("name", "Name", true, None, None))
                (simple_form_element("age", "Age", true, Some("number"), None))
                (simple_form_element("course", "Course", true, None, None))
                (textarea_form_element("remarks", "Remarks (optional)", ""))
                (submit_button("Add Student"))
            }
        }
    })
}

pub async fn post_add_student(
    State(state): State<RosterState>,
    Form(form): Form<StudentForm>,
) -> RosterResult<Redirect> {
    let new_student = NewStudent::try_from(form)?;
    let id = state.insert(new_student).await?;

    info!(%id, "Added student");
    Ok(Redirect::to("/"))
}
