// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use clap::Subcommand;
use log::debug;

use crate::{
    error::{Error, Result},
    gateway::{captcha, Executor as _},
    model::CaptchaDot,
};

use super::Context;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Fetch a new click captcha.
    New {
        /// Write the captcha image and its thumbnail into this directory.
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        save: Option<PathBuf>,
    },
    /// Submit the points clicked on a captcha.
    Verify {
        #[arg(long)]
        key: String,
        /// A clicked point written as X,Y. Repeat for each point, in order.
        #[arg(long = "dot", required = true)]
        dots: Vec<CaptchaDot>,
    },
}

/// An image as sent by the server: base64, optionally wrapped in a data URL.
struct Image<'data> {
    extension: &'data str,
    encoded: &'data str,
}

impl<'data> Image<'data> {
    fn parse(data: &'data str) -> Self {
        let Some((header, encoded)) = data
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
        else {
            return Self {
                extension: "png",
                encoded: data,
            };
        };

        let extension = header
            .trim_end_matches(";base64")
            .strip_prefix("image/")
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("png");
        Self { extension, encoded }
    }

    fn decode(&self) -> Result<Vec<u8>> {
        Ok(base64::decode(self.encoded.trim())?)
    }
}

fn save_image(dir: &Path, name: &str, data: &str) -> Result<PathBuf> {
    let image = Image::parse(data);
    let path = dir.join(format!("{name}.{}", image.extension));
    fs::write(&path, image.decode()?)?;
    debug!("Wrote captcha image to {}", path.display());
    Ok(path)
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, cx: &Context) -> Result<()> {
        let adapter = cx.store.adapter();
        match self {
            Self::New { save } => {
                let Some(captcha) = captcha::NewCaptcha.execute(adapter).await?.data else {
                    return Err(Error::Rejected("The server did not send a captcha".to_owned()));
                };

                println!("{}", captcha.key);
                if let Some(dir) = save {
                    fs::create_dir_all(&dir)?;
                    for (name, data) in [("image", &captcha.image), ("thumb", &captcha.thumb)] {
                        let path = save_image(&dir, &format!("{}-{name}", captcha.key), data)?;
                        println!("{}", path.display());
                    }
                }
            }
            Self::Verify { key, dots } => {
                let verdict = captcha::VerifyCaptcha { dots, key }
                    .execute(adapter)
                    .await?
                    .data;
                if !verdict.is_some_and(|v| v.success) {
                    return Err(Error::Rejected("Captcha verification failed".to_owned()));
                }
                println!("Captcha verified");
            }
        }
        Ok(())
    }
}
