use std::{path::Path, sync::Arc};

use client_common::{
    check_email,
    clipboard::Osc52,
    controller::{checksum::ChecksumController, password::PasswordController, Alerts},
    ApiClient, Backend,
};
use common::{
    algorithm::HashAlgorithm,
    api::{self, CheckBreaches, Decrypt, Encrypt, EncryptionAlgorithms, HashAlgorithms, Upload},
    consts::DEFAULT_SERVER_URL,
};
use eyre::WrapErr;
use rustyline::{error::ReadlineError, DefaultEditor};
use structopt::StructOpt;
use tokio::{runtime::Runtime, time::Instant};
use tracing::{error, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;

const HISTORY_PATH: &str = "history.txt";

const HELP: &str = "\
commands:
  checksum <file> [algorithm]
  verify <file> <checksum> [algorithm]
  password <password>         analyze right away
  type <password>             type it in, letter by letter
  clear | show
  copy                        copy the last checksum
  encrypt <algorithm> <password> <text...>
  decrypt <algorithm> <password> <salt> <encrypted>
  breaches <email>
  algorithms
  html on|off
  help";

#[derive(StructOpt, Debug)]
#[structopt(name = "cyberkit")]
struct Opt {
    /// Server root url
    #[structopt(short, long, default_value = DEFAULT_SERVER_URL)]
    server: String,
}

fn setup_logger() -> eyre::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("common=debug".parse()?)
        .add_directive("client_common=debug".parse()?)
        .add_directive("cyberkit=debug".parse()?);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber).wrap_err("setting default subscriber failed")?;

    Ok(())
}

struct Repl<'a> {
    rt: &'a Runtime,
    client: Arc<ApiClient>,
    checksum: ChecksumController<ApiClient>,
    password: PasswordController<ApiClient>,
    html: bool,
}

fn load(path: &str) -> Option<Upload> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let filename = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_owned());
            Some(Upload::new(filename, bytes))
        }
        Err(e) => {
            error!("could not read {}: {}", path, e);
            None
        }
    }
}

fn print_alerts(alerts: &mut Alerts) {
    for alert in alerts.visible(Instant::now()) {
        println!("[{}] {}", alert.kind, alert.message);
    }
    alerts.clear();
}

fn print_html(html: client_common::view::Result<String>) {
    match html {
        Ok(html) => println!("{}", html),
        Err(e) => error!("could not render: {:#}", e),
    }
}

impl Repl<'_> {
    fn call<E: api::Endpoint>(&self, endpoint: E) -> Option<E::Ret> {
        match self.rt.block_on(self.client.call(endpoint)) {
            Ok(ret) => Some(ret),
            Err(e) => {
                println!("[danger] {}", e);
                None
            }
        }
    }

    fn checksum(&mut self, path: &str, algorithm: &str) {
        let algorithm = HashAlgorithm::from_id_or_default(algorithm);
        self.rt.block_on(self.checksum.calculate(load(path), algorithm));
        print_alerts(&mut self.checksum.calc.alerts);
        if self.html {
            return print_html(self.checksum.calc_html());
        }
        if let Some(ret) = self.checksum.calc.panel.ready() {
            println!("{}  {}  ({})", ret.checksum, ret.filename, ret.algorithm.to_uppercase());
        }
    }

    fn verify(&mut self, path: &str, expected: &str, algorithm: &str) {
        let algorithm = HashAlgorithm::from_id_or_default(algorithm);
        self.rt.block_on(self.checksum.verify(load(path), algorithm, expected));
        print_alerts(&mut self.checksum.verify.alerts);
        if self.html {
            return print_html(self.checksum.verify_html());
        }
        if let Some(ret) = self.checksum.verify.panel.ready() {
            let verdict = if ret.is_valid { "Verification Successful" } else { "Verification Failed" };
            println!("{}: {}", verdict, ret.filename);
            println!("  expected:   {}", ret.provided_checksum);
            println!("  calculated: {}", ret.calculated_checksum);
        }
    }

    fn copy(&mut self) {
        let mut clipboard = Osc52::new(std::io::stdout());
        if self.checksum.copy_checksum(&mut clipboard) {
            println!("{}", self.checksum.copy_label());
        } else {
            println!("nothing to copy, run checksum first");
        }
    }

    fn show_password(&self) {
        if self.html {
            print_html(self.password.meter_html());
            print_html(self.password.feedback_html());
            return print_html(self.password.report_html());
        }
        let mut state = self.password.state();
        print_alerts(&mut state.alerts);
        println!("strength: {} ({}%)", state.meter.label, state.meter.width);
        if let Some(ret) = state.panel.ready() {
            println!("  length {}, entropy {} bits", ret.length, ret.entropy);
            println!("  time to crack: {}", client_common::crack_time::estimate_crack_time(ret.entropy));
        }
        if let client_common::controller::password::Feedback::Items(items) = &state.feedback {
            for item in items {
                println!("  - {}", item);
            }
        }
    }

    fn run(&mut self, words: &[&str]) {
        match *words {
            ["checksum", path] => self.checksum(path, ""),
            ["checksum", path, algorithm] => self.checksum(path, algorithm),
            ["verify", path, expected] => self.verify(path, expected, ""),
            ["verify", path, expected, algorithm] => self.verify(path, expected, algorithm),
            ["copy"] => self.copy(),
            ["password", password] => {
                self.password.state().input = password.to_owned();
                self.rt.block_on(self.password.analyze());
                self.show_password();
            }
            ["type", password] => {
                let mut typed = String::new();
                for c in password.chars() {
                    typed.push(c);
                    self.password.on_input(&typed);
                }
                self.rt.block_on(self.password.settle());
                self.show_password();
            }
            ["clear"] => {
                self.password.clear();
                self.show_password();
            }
            ["show"] => self.show_password(),
            ["encrypt", algorithm, password, ref text @ ..] if !text.is_empty() => {
                let req = Encrypt {
                    text: text.join(" "),
                    algorithm: algorithm.to_owned(),
                    password: password.to_owned(),
                };
                if let Some(ret) = self.call(req) {
                    println!("algorithm: {}\nsalt:      {}\nencrypted: {}", ret.algorithm, ret.salt, ret.encrypted);
                }
            }
            ["decrypt", algorithm, password, salt, encrypted] => {
                let req = Decrypt {
                    encrypted: encrypted.to_owned(),
                    salt: salt.to_owned(),
                    algorithm: algorithm.to_owned(),
                    password: password.to_owned(),
                };
                if let Some(ret) = self.call(req) {
                    println!("{}", ret.decrypted);
                }
            }
            ["breaches", email] => {
                if !check_email(email) {
                    return println!("[warning] Please enter a valid email address");
                }
                if let Some(ret) = self.call(CheckBreaches { email: email.to_owned() }) {
                    if self.html {
                        return print_html(client_common::view::breach_list(&ret.breaches));
                    }
                    if ret.breaches.is_empty() {
                        println!("No breaches found for this email address.");
                    }
                    for b in ret.breaches {
                        println!("{} ({}): {} accounts, {}", b.title, b.breach_date, b.pwn_count, b.data_classes.join(", "));
                    }
                }
            }
            ["algorithms"] => {
                if let Some(ret) = self.call(HashAlgorithms) {
                    for a in ret.algorithms {
                        println!("{:<9} {:<10} {}", a.id, a.security_level, a.use_case);
                    }
                }
                if let Some(ret) = self.call(EncryptionAlgorithms) {
                    for c in ret.algorithms {
                        println!("{:<9} {:<10} {}", c.id, c.strength, c.use_case);
                    }
                }
            }
            ["html", "on"] => self.html = true,
            ["html", "off"] => self.html = false,
            ["help"] => println!("{}", HELP),
            [] => {}
            _ => error!("unknown command, try `help`"),
        }
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    setup_logger()?;
    let opt = Opt::from_args();

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    // debounced analyses are spawned onto this runtime
    let _guard = rt.enter();

    let client = Arc::new(ApiClient::new(&opt.server));
    let mut repl = Repl {
        checksum: ChecksumController::new(client.clone()),
        password: PasswordController::new(client.clone()),
        client,
        rt: &rt,
        html: false,
    };

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_PATH).is_err() {
        println!("No previous history.");
    }
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let words: Vec<_> = line.split_ascii_whitespace().collect();
                repl.run(&words);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    rl.save_history(HISTORY_PATH)?;
    Ok(())
}
