use pinassign::configuration::Configuration;
use pinassign::shell;

fn main() -> anyhow::Result<()> {
    shell::run(Configuration::from_env())
}
