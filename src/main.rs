use log::error;

use lesson_scene::{
    demo_app::DemoLesson,
    framework::{application, config::RunParams},
};

fn main() {
    env_logger::init();

    let params = match std::env::args().nth(1) {
        Some(path) => match RunParams::from_file(&path) {
            Ok(params) => params,
            Err(err) => {
                error!("{}", err);
                std::process::exit(2);
            },
        },
        None => RunParams::default(),
    };

    if let Err(err) = application::run(|c| DemoLesson::new(c), params) {
        error!("{}", err);
        std::process::exit(1);
    }
}
