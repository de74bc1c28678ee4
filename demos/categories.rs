// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Run with `TT_LOGGER_TYPES=Kernel TT_LOGGER_LEVEL=info,Graph=debug cargo run --example categories`.

use tt_logger::Initializer;
use tt_logger::log_debug;
use tt_logger::log_info;
use tt_logger::log_types;
use tt_logger::log_warning;

log_types! {
    /// The categories of a model compiler.
    enum Compiler {
        Always,
        Graph,
        Kernel,
        Runtime,
    }
}

fn main() {
    Initializer::new().categories::<Compiler>().init().unwrap();

    log_info!("compiling {} graphs", 2);
    log_debug!(Compiler::Graph, "fused {} nodes", 17);
    log_info!(Compiler::Kernel, "emitted kernel {:?}", "matmul_8x8");
    log_warning!(Compiler::Runtime, "no device found, falling back to the simulator");

    tt_logger::flush();
}
