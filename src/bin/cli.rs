use clap::Parser;
use ferrosat::config::Config;
use ferrosat::dimacs::{clauses_from_dimacs_file, result_to_dimacs};
use ferrosat::solver::{SolveResult, Solver};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a DIMACS CNF file (may be gzip-compressed, `.gz`)
    #[arg(index = 1)]
    file: String,

    /// Reject malformed clauses instead of trusting the parser's output
    #[arg(long)]
    validate: bool,
}

fn main() {
    let args = Args::parse();

    let cnf = match clauses_from_dimacs_file(&args.file) {
        Ok(cnf) => cnf,
        Err(err) => {
            eprintln!("c error: {}", err);
            std::process::exit(1);
        }
    };

    let config = Config {
        validate_input: args.validate,
        ..Config::default()
    };
    let mut solver = Solver::with_config(cnf.num_vars, config);
    for clause in &cnf.clauses {
        if args.validate {
            let signed: Vec<i32> = clause.iter().map(|&lit| lit as i32).collect();
            if let Err(err) = solver.try_add_clause(&signed) {
                eprintln!("c error: {}", err);
                std::process::exit(1);
            }
        } else {
            solver.add_clause(clause);
        }
    }

    let result = solver.solve();

    println!("{}", create_output(&args, &solver, result));
}

fn create_output(args: &Args, solver: &Solver, result: SolveResult) -> String {
    let mut output = format!("c {}", BANNER);
    output.push_str(&format!("\nFile\n{}\n", args.file));
    output.push_str(&format!("\n{}\n", solver.stats().to_table()));
    output = output.replace('\n', "\nc ");
    output.push_str(&format!("\n{}", result_to_dimacs(solver, result)));
    output
}

const BANNER: &str = r#"
   __                                  _
  / _| ___ _ __ _ __ ___  ___  __ _ | |_
 | |_ / _ \ '__| '__/ _ \/ __|/ _` || __|
 |  _|  __/ |  | | | (_) \__ \ (_| || |_
 |_|  \___|_|  |_|  \___/|___/\__,_| \__|
"#;
