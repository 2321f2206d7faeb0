#![allow(non_snake_case)]

mod components;

fn main() {
    dioxus::launch(components::app::App);
}
