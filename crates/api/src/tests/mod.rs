// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod account_tests;
mod authorization_tests;
mod helpers;
mod response_tests;
mod results_tests;
