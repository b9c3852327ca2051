// Copyright 2026 the Accessible Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT
