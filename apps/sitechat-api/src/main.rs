use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = sitechat_api::Args::parse();

	sitechat_api::run(args).await
}
