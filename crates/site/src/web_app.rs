use std::rc::Rc;

use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::MemoryNotificationService;
use platform_host_web::web_host_services;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Web Desktop" />
        <Meta name="description" content="A desktop environment simulated in the browser." />
        <Stylesheet href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let toast_feed = MemoryNotificationService::default();
    let host_services = web_host_services(Rc::new(toast_feed.clone()));

    view! {
        <DesktopProvider host_services toast_feed>
            <DesktopShell />
        </DesktopProvider>
    }
}
