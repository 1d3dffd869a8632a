use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("transfero")
        .version("1.0.0")
        .author("Transfero Contributors")
        .about("Extract and translate text from web pages")
        .arg(clap::arg!(<INPUT> "URL list file (txt, json, csv), or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(-l --languages <LANGS> "Target language codes, comma separated")
                .default_value("en,zh-cn,vi"),
        )
        .arg(clap::arg!(-w --workers <NUM> "Concurrent page jobs").default_value("3"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--api_url <URL> "Translation endpoint URL").value_name("URL"))
        .arg(clap::arg!(--rows "Include per-fragment rows in text output"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "transfero", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "transfero", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "transfero", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "transfero", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
