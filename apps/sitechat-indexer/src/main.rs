use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = sitechat_indexer::Args::parse();

	sitechat_indexer::run(args).await
}
