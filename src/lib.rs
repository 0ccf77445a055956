//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod components;
mod config;
mod game;
mod model;
mod pages;
mod session;

// Top-Level pages
use crate::config::AppConfig;
use crate::pages::graph::GraphPage;
use crate::pages::help::HelpPage;
use crate::pages::not_found::NotFound;
use crate::session::QuizSession;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The app shell: navigation bar, the graph game at `/` and the help page.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::from_build_env();
	info!("Using quiz backend at {}", config.api_base_url);
	// one session per visit, shared by every route
	let quiz = QuizSession::new(&config);
	quiz.start();
	provide_context(quiz);
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Knowledge Path" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="top-nav">
				<A href="/">"🧠 Play"</A>
				<A href="/help">"📍 Help"</A>
			</nav>
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=GraphPage />
					<Route path=path!("/help") view=HelpPage />
				</Routes>
			</main>
		</Router>
	}
}
