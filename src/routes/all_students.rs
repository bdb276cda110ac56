use crate::{
    data::{
        DataType, IdForm,
        student::{AddStudentForm, Student},
    },
    error::{RollcallError, RollcallResult},
    maud_conveniences::{
        errors_list, form_submit_button, notification, simple_form_element, subtitle, table, title,
    },
    routes::sse::SseEvent,
    state::RollcallState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;

#[axum::debug_handler]
pub async fn get_students(State(state): State<RollcallState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            div hx-ext="sse" sse-connect="/sse_feed" class="container flex flex-row justify-center space-x-4" {
                div id="all_students" hx-get="/internal/get_students" hx-trigger="load" {}
                div id="in_focus" {}
            }
        }
    })
}

pub async fn internal_get_students(State(state): State<RollcallState>) -> RollcallResult<Markup> {
    let students = Student::get_all(&state).await?;

    let rows = students
        .into_iter()
        .map(|student| {
            [
                html! {(student.id)},
                html! {
                    a class="hover:text-blue-300 underline cursor-pointer" hx-get="/internal/get_student" hx-target="#in_focus" hx-vals={"{\"id\": " (student.id) "}"} {
                        (student.first_name)
                    }
                },
                html! {
                    @if let Some(last_name) = student.last_name.as_deref() {
                        p {(last_name)}
                    } @else {
                        p class="italic" {"-"}
                    }
                },
                html! {
                    button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-get="/internal/students/confirm_delete" hx-target="#in_focus" hx-vals={"{\"id\": " (student.id) "}"} {
                        "Delete"
                    }
                },
            ]
        })
        .collect();

    Ok(html! {
        div hx-get="/internal/get_students" hx-trigger="sse:crud_student" class="container mx-auto flex flex-col space-y-4" {
            (table(
                html! {
                    div class="flex flex-row items-center justify-between" {
                        (title("Students"))
                        div class="flex flex-row space-x-4" {
                            button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/get_students" hx-target="#all_students" {
                                "Refresh"
                            }
                            button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/form" hx-target="#in_focus" {
                                "Add new Student"
                            }
                        }
                    }
                },
                ["ID", "First Name", "Last Name", ""],
                rows,
            ))
        }
    })
}

pub async fn internal_get_student_in_detail(
    State(state): State<RollcallState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollcallResult<Markup> {
    let Some(student) =
        Student::get_from_db_by_id(id, &mut *state.get_connection().await?).await?
    else {
        return Err(RollcallError::MissingStudent { id });
    };

    Ok(student_in_detail(&student))
}

fn student_in_detail(student: &Student) -> Markup {
    let field = |label: &'static str, value: Markup| {
        html! {
            p class="text-gray-200 font-semibold" {
                (label)
                ": "
                span class="font-medium" {(value)}
            }
        }
    };

    html! {
        div hx-get="/internal/get_student" hx-trigger="sse:crud_student" hx-vals={"{\"id\": " (student.id) "}"} class="container mx-auto" {
            (subtitle(student))
            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md mx-auto" {
                div class="p-4" {
                    (field("ID", html! {(student.id)}))
                    (field("First Name", html! {(student.first_name)}))
                    @if let Some(last_name) = student.last_name.as_deref() {
                        (field("Last Name", html! {(last_name)}))
                    }
                    br;
                    div class="flex flex-row space-x-4" {
                        button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/form" hx-target="#in_focus" hx-vals={"{\"id\": " (student.id) "}"} {
                            "Edit student"
                        }
                        button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/confirm_delete" hx-target="#in_focus" hx-vals={"{\"id\": " (student.id) "}"} {
                            "Delete student"
                        }
                        button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/close_dialog" hx-target="#in_focus" {
                            "Close"
                        }
                    }
                }
            }
        }
    }
}

///Cancel/close target - swaps nothing back into the focus panel.
pub async fn internal_get_close_dialog() -> Markup {
    html! {}
}

#[derive(Deserialize)]
pub struct MaybeIdForm {
    pub id: Option<i64>,
}

pub async fn internal_get_student_form(
    State(state): State<RollcallState>,
    Query(MaybeIdForm { id }): Query<MaybeIdForm>,
) -> RollcallResult<Markup> {
    let student = match id {
        Some(id) => Some(
            Student::get_from_db_by_id(id, &mut *state.get_connection().await?)
                .await?
                .ok_or(RollcallError::MissingStudent { id })?,
        ),
        None => None,
    };

    let values = AddStudentForm {
        first_name: student
            .as_ref()
            .map(|student| student.first_name.clone())
            .unwrap_or_default(),
        last_name: student
            .as_ref()
            .and_then(|student| student.last_name.clone())
            .unwrap_or_default(),
    };

    Ok(student_form(id, &values, &[]))
}

fn student_form(id: Option<i64>, values: &AddStudentForm, errors: &[&'static str]) -> Markup {
    html! {
        @if id.is_some() {
            (title("Update Student"))
        } @else {
            (title("New Student"))
        }

        @if !errors.is_empty() {
            (errors_list(errors.iter().copied()))
        }

        form hx-put="/students" hx-trigger="submit" hx-target="#in_focus" class="p-4" {
            (simple_form_element("first_name", "First Name", true, None, Some(&values.first_name)))
            (simple_form_element("last_name", "Last Name", false, None, Some(&values.last_name)))

            @if let Some(id) = id {
                input type="hidden" value=(id) name="id" id="id" {}
            }

            div class="flex items-center justify-between" {
                (form_submit_button(Some("Save")))
                @if let Some(id) = id {
                    button type="button" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/get_student" hx-target="#in_focus" hx-vals={"{\"id\": " (id) "}"} {
                        "Cancel"
                    }
                } @else {
                    button type="button" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/students/close_dialog" hx-target="#in_focus" {
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[derive(Deserialize)]
pub struct SaveStudentForm {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
}

pub async fn put_student(
    State(state): State<RollcallState>,
    Form(SaveStudentForm {
        id,
        first_name,
        last_name,
    }): Form<SaveStudentForm>,
) -> RollcallResult<Markup> {
    let values = AddStudentForm {
        first_name,
        last_name,
    };

    if values.first_name.trim().is_empty() {
        //no persistence - the dialog stays open with what was typed
        return Ok(student_form(id, &values, &["First name must not be empty"]));
    }

    let id = Student::save(id, values, &mut *state.get_connection().await?).await?;
    state.send_sse_event(SseEvent::CrudStudent);

    let detail = internal_get_student_in_detail(State(state.clone()), Query(IdForm { id })).await?;

    Ok(html! {
        (notification("Student saved"))
        (detail)
    })
}

pub async fn internal_get_confirm_delete(
    State(state): State<RollcallState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollcallResult<Markup> {
    let Some(student) =
        Student::get_from_db_by_id(id, &mut *state.get_connection().await?).await?
    else {
        return Err(RollcallError::MissingStudent { id });
    };

    Ok(html! {
        (title("Confirm"))
        div class="p-4" {
            p class="text-gray-200 mb-4" {
                "Do you really want to delete the student "
                span class="font-semibold" {(student.name())}
                "?"
            }
            div class="flex flex-row space-x-4" {
                button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/get_student" hx-target="#in_focus" hx-vals={"{\"id\": " (id) "}"} {
                    "Cancel"
                }
                button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-delete="/students" hx-target="#in_focus" hx-vals={"{\"id\": " (id) "}"} {
                    "Delete"
                }
            }
        }
    })
}

pub async fn delete_student(
    State(state): State<RollcallState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RollcallResult<Markup> {
    Student::remove_from_database(id, &mut *state.get_connection().await?).await?;
    state.send_sse_event(SseEvent::CrudStudent);

    Ok(html! {})
}
