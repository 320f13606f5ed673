use crate::{
    data::{StudentStore, student::Student},
    error::RosterResult,
    maud_conveniences::render_table,
    state::RosterState,
};
use axum::extract::{Query, State};
use maud::{Markup, html};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

pub async fn get_index_route(State(state): State<RosterState>) -> RosterResult<Markup> {
    let students = state.list_all().await?;
    for student in &students {
        debug!(id = %student.id, "Listing student");
    }

    Ok(state.render(render_student_list(&students, "")))
}

pub async fn get_search(
    State(state): State<RosterState>,
    Query(SearchQuery { name }): Query<SearchQuery>,
) -> RosterResult<Markup> {
    let students = state.find_by_name_substring(&name).await?;
    debug!(?name, found = students.len(), "Searched students");

    Ok(state.render(render_student_list(&students, &name)))
}

fn render_student_list(students: &[Student], query: &str) -> Markup {
    let rows = students
        .iter()
        .map(|student| {
            [
                html! {
                    a href={"/profile/" (student.id)} class="text-blue-400 hover:underline" {(student.name)}
                },
                html! {(student.age)},
                html! {(student.course)},
            ]
        })
        .collect();

    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            form action="/search" method="get" class="flex flex-row space-x-2" {
                input type="search" name="name" value=(query) placeholder="Search by name" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
                button type="submit" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {"Search"}
            }

            @if students.is_empty() {
                p class="text-gray-300 italic" {"No students found."}
            } @else {
                (render_table("Students", ["Name", "Age", "Course"], rows))
            }

            a href="/add_student" class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded text-center" {
                "Add new Student"
            }
        }
    }
}
