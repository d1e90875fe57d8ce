// SPDX-License-Identifier: MPL-2.0
use iced_toasts::app::{self, Flags};
use iced_toasts::notifications::Position;
use std::path::PathBuf;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();

    let position = match args.opt_value_from_str::<_, Position>("--position") {
        Ok(position) => position,
        Err(err) => {
            log::warn!("ignoring --position: {err}");
            None
        }
    };
    let config_path = match args.opt_value_from_str::<_, PathBuf>("--config") {
        Ok(path) => path,
        Err(err) => {
            log::warn!("ignoring --config: {err}");
            None
        }
    };

    let flags = Flags {
        position,
        config_path,
        expand: args.contains("--expand"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("unused arguments: {rest:?}");
    }

    app::run(flags)
}
