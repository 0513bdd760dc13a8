use anyhow::Result;

// Print the OpenAPI document so it can be published without running the server.
fn main() -> Result<()> {
    let doc = skillswap::skillswap::openapi();
    println!("{}", doc.to_pretty_json()?);

    Ok(())
}
