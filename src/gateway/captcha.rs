// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use crate::{
    http::Method,
    model::{Captcha, CaptchaDot, CaptchaVerdict},
};

use super::Executor;

#[derive(Debug, Serialize)]
pub(crate) struct NewCaptcha;

impl Executor for NewCaptcha {
    type Response = Captcha;

    const METHOD: Method = Method::GET;

    fn path(&self) -> String {
        "/captcha".to_owned()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyCaptcha {
    pub(crate) dots: Vec<CaptchaDot>,
    pub(crate) key: String,
}

impl Executor for VerifyCaptcha {
    type Response = CaptchaVerdict;

    const METHOD: Method = Method::POST;

    fn path(&self) -> String {
        "/captcha".to_owned()
    }
}
