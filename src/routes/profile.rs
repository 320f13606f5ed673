use crate::{
    data::{
        StudentStore,
        student::{Student, StudentId},
    },
    error::{MissingStudentSnafu, RosterError, RosterResult},
    maud_conveniences::{submit_button, textarea_form_element, title},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::OptionExt;

pub async fn get_profile(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> RosterResult<Markup> {
    debug!(?id, "Received student id");
    let id: StudentId = id.parse()?;

    let student = state
        .find_by_id(id)
        .await?
        .context(MissingStudentSnafu { id })?;
    debug!(?student, "Found student");

    Ok(state.render(render_profile(&student)))
}

#[derive(Deserialize, Debug)]
pub struct RemarksForm {
    #[serde(default)]
    pub remarks: String,
}

pub async fn post_remarks(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    Form(RemarksForm { remarks }): Form<RemarksForm>,
) -> RosterResult<Redirect> {
    let id = id
        .parse::<StudentId>()
        .map_err(RosterError::into_server_fault)?;
    state
        .update_remarks(id, remarks)
        .await
        .map_err(RosterError::into_server_fault)?;

    info!(%id, "Updated remarks");
    Ok(Redirect::to(&format!("/profile/{id}")))
}

fn render_profile(student: &Student) -> Markup {
    let detail = |label: &'static str, value: Markup| {
        html! {
            p class="text-gray-200 font-semibold" {
                (label)
                ": "
                span class="font-medium" {(value)}
            }
        }
    };

    html! {
        div class="container mx-auto" {
            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md mx-auto p-4 flex flex-col space-y-4" {
                (title(&student.name))
                div {
                    (detail("Age", html! {(student.age)}))
                    (detail("Course", html! {(student.course)}))
                    (detail("Remarks", html! {
                        @if student.remarks.is_empty() {
                            span class="italic text-gray-400" {"None yet"}
                        } @else {
                            @for line in student.remarks.lines() {
                                (line)
                                br;
                            }
                        }
                    }))
                }

                form action={"/profile/" (student.id) "/remarks"} method="post" {
                    (textarea_form_element("remarks", "Update Remarks", &student.remarks))
                    (submit_button("Save Remarks"))
                }

                div class="flex flex-row space-x-4" {
                    a href={"/profile/" (student.id) "/edit"} class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Edit Student"}
                    a href="/" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Back to Roster"}
                }
            }
        }
    }
}
