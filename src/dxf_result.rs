// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::DxfError;

pub type DxfResult<T> = Result<T, DxfError>;
