//! commitcraft-hooks: hook entry point for a git commit assistant.
//!
//! `commitcraft-hooks pre-tool-use` reads a tool invocation and answers
//! allow/deny (possibly with a cleaned commit command).
//! `commitcraft-hooks user-prompt-submit` reads a prompt and answers with
//! help text (block) or an enhanced prompt (allow).
//!
//! Either way, one JSON object goes to stdout and the exit status is 0.

use commitcraft_hooks::config::Config;
use commitcraft_hooks::logging;
use commitcraft_hooks::runner::{self, Hook};

const USAGE: &str = "usage: commitcraft-hooks <pre-tool-use|user-prompt-submit>";

fn main() {
    logging::init();
    std::panic::set_hook(Box::new(|info| log::error!("Hook error: {info}")));

    let arg = std::env::args().nth(1).unwrap_or_default();
    let Some(hook) = Hook::from_arg(&arg) else {
        eprintln!("{USAGE}");
        std::process::exit(0);
    };

    let config = Config::load();
    if config.settings.debug {
        logging::enable_debug();
    }
    log::debug!("running {} hook", hook.name());

    let output = runner::run(hook, config);
    println!("{output}");

    // The worker may still be blocked on stdin after a timeout.
    std::process::exit(0);
}
