use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::{Header, OpenSource};
use crate::theme::ColorMode;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Owned here and handed down as a prop rather than through context
    let mode = RwSignal::new(ColorMode::default());

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/portfolio.css"/>

        <Title text="Open Source Contributions"/>

        <Router>
            <main class=move || mode.get().class("page")>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=move || view! { <HomePage mode/> }/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage(mode: RwSignal<ColorMode>) -> impl IntoView {
    view! {
        <div class="container">
            <Header mode />
            <OpenSource mode />
        </div>
    }
}
