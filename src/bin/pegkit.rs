// pegkit command line: parses function-call expressions with the sample grammar.
// Usage: cargo run --bin pegkit -- parse 'SUM(1,MUL(4,5))'

fn main() {
    pegkit::cli::run();
}
