use laser_chess::protocol::text_loop::run_stdio_loop;

fn main() -> std::io::Result<()> {
    env_logger::init();
    run_stdio_loop()
}
