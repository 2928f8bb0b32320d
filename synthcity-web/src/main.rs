#[macroquad::main("Synthwave City")]
async fn main() {
    synthcity_web_lib::run().await;
}
