use rye_abstractions::Session;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let session = Session::from_env();
    let cases = smoke_listing::discover(session.discovery_options())?;

    let summary = session.try_run(cases)?;
    anyhow::ensure!(
        summary.pending + summary.filtered_out == 5,
        "unexpected totals: {:?}",
        summary
    );

    Ok(())
}
