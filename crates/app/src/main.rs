fn main() {
    #[cfg(feature = "web")]
    dioxus::launch(app::App);
}
