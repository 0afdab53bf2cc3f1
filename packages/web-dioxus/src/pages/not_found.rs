use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            class: "min-h-screen flex flex-col items-center justify-center bg-gray-100",
            h1 { class: "text-4xl font-bold text-gray-900 mb-2", "404" }
            p { class: "text-gray-600 mb-6", "No existe la página {path}" }
            Link {
                to: Route::DashboardPage {},
                class: "text-amber-700 hover:text-amber-900 font-medium",
                "Volver al inicio"
            }
        }
    }
}
