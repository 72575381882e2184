use dioxus::prelude::*;

use crate::domain::entities::auth::{accessible_routes, Route, SessionUser};

#[component]
pub fn Sidebar(web_name: String, user: SessionUser, current: Route, on_navigate: EventHandler<Route>) -> Element {
    let routes = accessible_routes(user.role);
    rsx! {
        nav {
            style: "width: 200px; background: #001529; color: #fff; display: flex; flex-direction: column; padding: 12px 0;",
            div { style: "font-size: 18px; font-weight: 600; padding: 8px 20px 16px;", "{web_name}" }
            for route in routes {
                {
                    let background = if route == current { "#1677ff" } else { "transparent" };
                    rsx! {
                        div {
                            key: "{route.path()}",
                            style: "padding: 10px 20px; cursor: pointer; background: {background};",
                            onclick: move |_| on_navigate.call(route),
                            "{route.label()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Header(title: String, user: SessionUser, on_logout: EventHandler<()>) -> Element {
    rsx! {
        header {
            style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 20px; border-bottom: 1px solid #e5e5e5; background: #fff;",
            h2 { style: "margin: 0; font-size: 18px;", "{title}" }
            div {
                style: "display: flex; align-items: center; gap: 12px;",
                span { "{user.name}" }
                span { style: "color: #888;", "({user.role.as_str()})" }
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| on_logout.call(()),
                    "Logout"
                }
            }
        }
    }
}
