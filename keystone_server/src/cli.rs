use std::{env, env::VarError};

use keystone_engine::hash_password;

/// There's no real CLI for the server, so just do quick 'n dirty.
///
/// `keystone_server hash-password <password> <salt>` prints the value to use for `KS_ADMIN_PASSWORD_HASH`. Any other
/// arguments print the help text. Returns true if arguments were given, in which case the server should not start.
pub fn handle_command_line_args() -> bool {
    let args = env::args().skip(1).collect::<Vec<String>>();
    match args.as_slice() {
        [] => false,
        [cmd, password, salt] if cmd == "hash-password" => {
            println!("{}", hash_password(password, salt));
            true
        },
        _ => {
            display_readme();
            display_envs();
            true
        },
    }
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 6] =
        ["RUST_LOG", "KS_HOST", "KS_PORT", "KS_TOKEN_LIFETIME", "KS_ADMIN_USERNAME", "KS_MAX_BODY_BYTES"];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
