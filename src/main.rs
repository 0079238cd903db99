use pfetch::app::{self, Invocation};
use pfetch::{logging, terminal, Context};
use std::io::{self, BufWriter};

fn main() {
    let invocation = Invocation::from_args(std::env::args().skip(1));
    let Invocation::Run { debug } = invocation else {
        // Nothing useful to do if stdout is gone.
        let _ = app::respond(invocation, &mut io::stdout());
        return;
    };

    logging::init(debug);
    let ctx = Context::from_env(debug);
    let registry = app::load_registry(&ctx);

    terminal::install_signal_restore();
    let stdout = io::stdout();
    if let Err(err) = app::run(&ctx, &registry, BufWriter::new(stdout.lock())) {
        tracing::debug!(%err, "output interrupted");
    }
}
